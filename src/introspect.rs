//! Best-effort identity resolution for callables.
//!
//! Identity is only used to label invocation outcomes and log lines; dispatch never
//! depends on it. A callable is identified in one of two ways:
//!
//! - explicitly, when it was created with [`Callable::named`];
//! - implicitly, from the type name of a named function item, e.g.
//!   `my_app::text::trim_greeting` or `my_app::Counter::increment`.
//!
//! Closures, function pointers and boxed trait objects carry no usable name and
//! resolve to `Ok(None)`.
//!
//! Parameter and return types are decoded from the recorded type names in both
//! cases. Array types need care here: `[u8; 4]` uses `;` as the length separator,
//! which is only meaningful inside the brackets.

use std::fmt;

use crate::{Callable, CallableDescriptor, ResolutionError};

const PRIMITIVES: &[&str] = &[
    "bool", "char", "str", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64", "!",
];

/// A decoded parameter or return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Unit,
    Primitive(String),
    Array {
        element: Box<TypeDescriptor>,
        len: usize,
    },
    Slice(Box<TypeDescriptor>),
    Reference {
        mutable: bool,
        inner: Box<TypeDescriptor>,
    },
    Tuple(Vec<TypeDescriptor>),
    /// Any named type, kept verbatim (`alloc::vec::Vec<u8>`, `fn(i32) -> i32`, ...).
    Path(String),
}

impl TypeDescriptor {
    /// Decodes a type name as printed by [`std::any::type_name`].
    ///
    /// ```rust
    /// use multicast_registry::TypeDescriptor;
    ///
    /// let ty = TypeDescriptor::parse("&[u8; 4]").unwrap();
    /// assert_eq!(ty.to_string(), "&[u8; 4]");
    /// ```
    pub fn parse(text: &str) -> Result<Self, ResolutionError> {
        decode_type(text, text)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Unit => write!(f, "()"),
            TypeDescriptor::Primitive(name) | TypeDescriptor::Path(name) => write!(f, "{name}"),
            TypeDescriptor::Array { element, len } => write!(f, "[{element}; {len}]"),
            TypeDescriptor::Slice(element) => write!(f, "[{element}]"),
            TypeDescriptor::Reference { mutable: true, inner } => write!(f, "&mut {inner}"),
            TypeDescriptor::Reference { mutable: false, inner } => write!(f, "&{inner}"),
            TypeDescriptor::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                if elements.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// The declared identity of a callable: where it lives, what it is called and
/// what it takes and returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionIdentity {
    owner: String,
    name: String,
    params: Vec<TypeDescriptor>,
    returns: TypeDescriptor,
}

impl FunctionIdentity {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        params: Vec<TypeDescriptor>,
        returns: TypeDescriptor,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            params,
            returns,
        }
    }

    /// Owning module or type path, e.g. `my_app::text` or `my_app::Counter`.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    pub fn returns(&self) -> &TypeDescriptor {
        &self.returns
    }
}

impl fmt::Display for FunctionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.owner, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.returns)
    }
}

/// Resolves the identity of a callable.
///
/// Returns `Ok(None)` for anonymous callables (closures, function pointers, boxed
/// trait objects) that were not created with [`Callable::named`].
///
/// # Errors
///
/// - [`ResolutionError::MalformedSignature`] if a recorded type name cannot be decoded
/// - [`ResolutionError::MissingOwner`] if a function path has no owning module or type
///
/// # Examples
///
/// ```rust
/// use multicast_registry::{resolve, Callable};
///
/// fn trim_greeting(greeting: String) -> Result<String, ()> {
///     Ok(greeting.trim().to_string())
/// }
///
/// let named: Callable<(String,), String, ()> = Callable::new(trim_greeting);
/// let identity = resolve(&named).unwrap().unwrap();
/// assert_eq!(identity.name(), "trim_greeting");
/// assert_eq!(identity.params()[0].to_string(), "alloc::string::String");
///
/// let anonymous: Callable<(String,), String, ()> = Callable::new(|s: String| Ok(s));
/// assert_eq!(resolve(&anonymous), Ok(None));
/// ```
pub fn resolve<Args, R, E>(
    callable: &Callable<Args, R, E>,
) -> Result<Option<FunctionIdentity>, ResolutionError> {
    resolve_descriptor(callable.descriptor())
}

/// Same as [`resolve`], starting from the descriptor alone.
pub fn resolve_descriptor(
    descriptor: &CallableDescriptor,
) -> Result<Option<FunctionIdentity>, ResolutionError> {
    let (owner, name) = match descriptor.declared() {
        Some((owner, name)) => (owner.to_string(), name.to_string()),
        None => match decode_path(descriptor.type_name())? {
            Some(path) => path,
            None => return Ok(None),
        },
    };

    let params = match decode_type(descriptor.params(), descriptor.params())? {
        TypeDescriptor::Unit => Vec::new(),
        TypeDescriptor::Tuple(params) => params,
        _ => {
            return Err(malformed(
                descriptor.params(),
                "argument list is not a tuple",
            ))
        }
    };
    let returns = decode_type(descriptor.returns(), descriptor.returns())?;

    Ok(Some(FunctionIdentity {
        owner,
        name,
        params,
        returns,
    }))
}

/// Pointers, references and other non-path types never name a function item.
fn is_anonymous(type_name: &str) -> bool {
    ["fn(", "dyn ", "unsafe ", "extern ", "&", "*", "(", "["]
        .iter()
        .any(|prefix| type_name.starts_with(prefix))
}

/// Only the final segment decides: a closure ends in `{{closure}}`, and a
/// capitalized segment is a wrapper type such as `Box<dyn Fn(..)>`.
fn is_function_item(name: &str) -> bool {
    name != "{{closure}}" && !name.starts_with(|ch: char| ch.is_ascii_uppercase())
}

/// Splits a function item path into owner and name.
fn decode_path(type_name: &str) -> Result<Option<(String, String)>, ResolutionError> {
    if is_anonymous(type_name) {
        return Ok(None);
    }

    let mut segments = split_path(type_name)?;
    let Some(last) = segments.pop() else {
        return Ok(None);
    };
    // `identity<i32>` is reported as `identity`
    let name = last.split_once('<').map_or(last, |(name, _)| name).trim();
    if name.is_empty() || !is_function_item(name) {
        return Ok(None);
    }
    if segments.is_empty() || segments.iter().any(|segment| segment.trim().is_empty()) {
        return Err(ResolutionError::MissingOwner {
            type_name: type_name.to_string(),
        });
    }

    Ok(Some((segments.join("::"), name.to_string())))
}

fn malformed(signature: &str, reason: &'static str) -> ResolutionError {
    ResolutionError::MalformedSignature {
        signature: signature.to_string(),
        reason,
    }
}

fn decode_type(text: &str, signature: &str) -> Result<TypeDescriptor, ResolutionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(malformed(signature, "empty type"));
    }

    if let Some(rest) = text.strip_prefix('&') {
        let rest = rest.trim_start();
        let (mutable, inner) = match rest.strip_prefix("mut ") {
            Some(inner) => (true, inner),
            None => (false, rest),
        };
        return Ok(TypeDescriptor::Reference {
            mutable,
            inner: Box::new(decode_type(inner, signature)?),
        });
    }

    if let Some(inner) = enclosed(text, '[', ']') {
        let parts = split_top_level(inner, ';', signature)?;
        return match parts.as_slice() {
            [element] => Ok(TypeDescriptor::Slice(Box::new(decode_type(
                element, signature,
            )?))),
            [element, len] => {
                let len = len
                    .trim()
                    .parse()
                    .map_err(|_| malformed(signature, "invalid array length"))?;
                Ok(TypeDescriptor::Array {
                    element: Box::new(decode_type(element, signature)?),
                    len,
                })
            }
            _ => Err(malformed(signature, "too many `;` in array type")),
        };
    }

    if let Some(inner) = enclosed(text, '(', ')') {
        let mut parts = split_top_level(inner, ',', signature)?;
        let trailing_comma = parts.last().is_some_and(|part| part.trim().is_empty());
        if trailing_comma {
            parts.pop();
        }
        return match parts.as_slice() {
            [] => Ok(TypeDescriptor::Unit),
            [single] if !trailing_comma => decode_type(single, signature),
            _ => parts
                .iter()
                .map(|part| decode_type(part, signature))
                .collect::<Result<Vec<_>, _>>()
                .map(TypeDescriptor::Tuple),
        };
    }

    if split_top_level(text, ',', signature)?.len() > 1 {
        return Err(malformed(signature, "unexpected `,` outside brackets"));
    }

    if PRIMITIVES.contains(&text) {
        Ok(TypeDescriptor::Primitive(text.to_string()))
    } else {
        Ok(TypeDescriptor::Path(text.to_string()))
    }
}

/// Returns the characters of `text` that sit outside any brackets, with their
/// byte offsets. The `>` of a `->` arrow does not close anything.
fn top_level(text: &str, signature: &str) -> Result<Vec<(usize, char)>, ResolutionError> {
    let mut depth = 0usize;
    let mut prev = None;
    let mut found = Vec::new();

    for (offset, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '{' | '<' => depth += 1,
            '>' if prev == Some('-') => {}
            ')' | ']' | '}' | '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed(signature, "unbalanced brackets"))?;
            }
            _ if depth == 0 => found.push((offset, ch)),
            _ => {}
        }
        prev = Some(ch);
    }

    if depth != 0 {
        return Err(malformed(signature, "unbalanced brackets"));
    }
    Ok(found)
}

fn split_top_level<'a>(
    text: &'a str,
    separator: char,
    signature: &str,
) -> Result<Vec<&'a str>, ResolutionError> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (offset, ch) in top_level(text, signature)? {
        if ch == separator {
            parts.push(&text[start..offset]);
            start = offset + ch.len_utf8();
        }
    }
    parts.push(&text[start..]);
    Ok(parts)
}

/// Splits a path at every `::` that is not nested inside generic arguments.
fn split_path(path: &str) -> Result<Vec<&str>, ResolutionError> {
    let colons: Vec<usize> = top_level(path, path)?
        .into_iter()
        .filter(|&(_, ch)| ch == ':')
        .map(|(offset, _)| offset)
        .collect();

    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < colons.len() {
        if colons.get(i + 1) == Some(&(colons[i] + 1)) {
            segments.push(&path[start..colons[i]]);
            start = colons[i] + 2;
            i += 2;
        } else {
            i += 1;
        }
    }
    segments.push(&path[start..]);
    Ok(segments)
}

/// The contents of `text` if it is wrapped in one matching `open`/`close` pair.
fn enclosed(text: &str, open: char, close: char) -> Option<&str> {
    let inner = text.strip_prefix(open)?.strip_suffix(close)?;
    top_level(inner, inner).ok().map(|_| inner)
}
