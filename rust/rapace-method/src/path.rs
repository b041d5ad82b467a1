//! Fully qualified method names.
//!
//! A method name has the structure `/<package>.<Service>/<Method>`: the
//! service segment is the service's fully qualified name (the package may be
//! empty), the method segment is the method as declared in the service.
//!
//! Descriptors take the declared name as-is; these checks are for tooling
//! that wants to split or audit names.

use std::fmt;

/// A parsed `/<service>/<method>` name, borrowing from the original string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodPath<'a> {
    service: &'a str,
    method: &'a str,
}

impl<'a> MethodPath<'a> {
    /// Parse a fully qualified method name.
    ///
    /// # Errors
    ///
    /// Returns the first rule the name breaks; see [`MethodPathError`].
    pub fn parse(name: &'a str) -> Result<Self, MethodPathError> {
        Self::validate(name)?;

        // validate() guarantees a leading '/' and exactly one more.
        let rest = &name[1..];
        let split = rest.find('/').ok_or(MethodPathError::MissingMethod)?;
        Ok(MethodPath {
            service: &rest[..split],
            method: &rest[split + 1..],
        })
    }

    /// Check a method name without splitting it. Usable in const contexts.
    pub const fn validate(name: &str) -> Result<(), MethodPathError> {
        let bytes = name.as_bytes();
        if bytes.is_empty() {
            return Err(MethodPathError::Empty);
        }
        if bytes[0] != b'/' {
            return Err(MethodPathError::MissingLeadingSlash);
        }

        let mut separator = 0;
        let mut i = 1;
        while i < bytes.len() {
            let b = bytes[i];
            if b.is_ascii_whitespace() || b.is_ascii_control() {
                return Err(MethodPathError::InvalidCharacter);
            }
            if b == b'/' {
                if separator != 0 {
                    return Err(MethodPathError::TooManySegments);
                }
                separator = i;
            }
            i += 1;
        }

        if separator == 0 {
            return Err(MethodPathError::MissingMethod);
        }
        if separator == 1 {
            return Err(MethodPathError::EmptyService);
        }
        if separator == bytes.len() - 1 {
            return Err(MethodPathError::EmptyMethod);
        }

        // Package components: no leading, trailing or doubled dots.
        if bytes[1] == b'.' || bytes[separator - 1] == b'.' {
            return Err(MethodPathError::EmptyPackageComponent);
        }
        let mut j = 2;
        while j < separator {
            if bytes[j] == b'.' && bytes[j - 1] == b'.' {
                return Err(MethodPathError::EmptyPackageComponent);
            }
            j += 1;
        }

        Ok(())
    }

    /// Service segment, including the package (e.g. `routeguide.RouteGuide`).
    pub fn service(&self) -> &'a str {
        self.service
    }

    /// Package part of the service segment, if any (e.g. `routeguide`).
    pub fn package(&self) -> Option<&'a str> {
        self.service.rsplit_once('.').map(|(package, _)| package)
    }

    /// Service name without its package (e.g. `RouteGuide`).
    pub fn service_name(&self) -> &'a str {
        self.service
            .rsplit_once('.')
            .map_or(self.service, |(_, name)| name)
    }

    /// Method segment (e.g. `GetFeature`).
    pub fn method(&self) -> &'a str {
        self.method
    }
}

impl fmt::Display for MethodPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.service, self.method)
    }
}

/// Reasons a method name is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodPathError {
    /// Name is the empty string
    Empty,
    /// Name does not start with `/`
    MissingLeadingSlash,
    /// No `/` separates service and method
    MissingMethod,
    /// More than two `/`-separated segments
    TooManySegments,
    /// Service segment is empty
    EmptyService,
    /// Method segment is empty
    EmptyMethod,
    /// Service segment has an empty package component (`a..B`, `.B`, `a.`)
    EmptyPackageComponent,
    /// Whitespace or control character in the name
    InvalidCharacter,
}

impl MethodPathError {
    /// Static description of the broken rule.
    pub const fn as_str(self) -> &'static str {
        match self {
            MethodPathError::Empty => "method name is empty",
            MethodPathError::MissingLeadingSlash => "method name must start with '/'",
            MethodPathError::MissingMethod => "method name must have the form /<service>/<method>",
            MethodPathError::TooManySegments => "method name has more than two '/' segments",
            MethodPathError::EmptyService => "service segment of method name is empty",
            MethodPathError::EmptyMethod => "method segment of method name is empty",
            MethodPathError::EmptyPackageComponent => {
                "service segment of method name has an empty package component"
            }
            MethodPathError::InvalidCharacter => {
                "method name contains whitespace or control characters"
            }
        }
    }
}

impl fmt::Display for MethodPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for MethodPathError {}
