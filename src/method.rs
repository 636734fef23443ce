//! Bitmask method sets with an `ALLOW_ALL` escape value.
//!
//! A [`MethodSet`] represents the HTTP methods an endpoint accepts. Single
//! methods are combined with `|`, and `ALLOW_ALL` supersedes every other bit:
//! once it is set, membership tests succeed for any incoming method,
//! recognized or not.

use http::Method;
use std::fmt;
use std::ops::BitOr;

/// Capability set over the seven supported HTTP methods plus `ALLOW_ALL`.
///
/// The bit layout is fixed and part of no serialized format; only the set
/// operations below are meaningful to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodSet(u16);

impl MethodSet {
    /// The empty set. An endpoint registered with it can never match a
    /// request; the registry warns when it sees one.
    pub const NONE: MethodSet = MethodSet(0);
    pub const GET: MethodSet = MethodSet(1);
    pub const POST: MethodSet = MethodSet(2);
    pub const PUT: MethodSet = MethodSet(4);
    pub const PATCH: MethodSet = MethodSet(8);
    pub const DELETE: MethodSet = MethodSet(16);
    pub const HEAD: MethodSet = MethodSet(32);
    pub const OPTIONS: MethodSet = MethodSet(64);
    /// Matches any incoming method, including tokens that are not one of the
    /// seven named methods.
    pub const ALLOW_ALL: MethodSet = MethodSet(128);

    const NAMED: [(MethodSet, &'static str); 7] = [
        (Self::GET, "GET"),
        (Self::POST, "POST"),
        (Self::PUT, "PUT"),
        (Self::PATCH, "PATCH"),
        (Self::DELETE, "DELETE"),
        (Self::HEAD, "HEAD"),
        (Self::OPTIONS, "OPTIONS"),
    ];

    /// Parse an incoming request's method token.
    ///
    /// The token goes through `http::Method`, whose canonical constants are
    /// the uppercase names; any other spelling (including lowercase) parses
    /// as an extension method and yields `None`, as do malformed tokens. An
    /// unrecognized method never matches a plain method set, but always
    /// matches `ALLOW_ALL` (see [`MethodSet::allows`]).
    #[must_use]
    pub fn parse_token(token: &str) -> Option<MethodSet> {
        let method = Method::from_bytes(token.as_bytes()).ok()?;
        Self::from_method(&method)
    }

    /// Convert one of the canonical `http::Method` constants to its flag.
    ///
    /// Extension methods (including lowercase spellings, which `http` treats
    /// as distinct methods) have no flag and yield `None`.
    #[must_use]
    pub fn from_method(method: &Method) -> Option<MethodSet> {
        match *method {
            Method::GET => Some(Self::GET),
            Method::POST => Some(Self::POST),
            Method::PUT => Some(Self::PUT),
            Method::PATCH => Some(Self::PATCH),
            Method::DELETE => Some(Self::DELETE),
            Method::HEAD => Some(Self::HEAD),
            Method::OPTIONS => Some(Self::OPTIONS),
            _ => None,
        }
    }

    /// Bitwise union of two sets.
    #[must_use]
    pub fn union(self, other: MethodSet) -> MethodSet {
        MethodSet(self.0 | other.0)
    }

    /// Whether an incoming method is a member of this set.
    ///
    /// `incoming` is `None` for unrecognized tokens. `ALLOW_ALL` admits
    /// everything; otherwise unrecognized methods are never members.
    #[must_use]
    pub fn allows(self, incoming: Option<MethodSet>) -> bool {
        if self.0 & Self::ALLOW_ALL.0 != 0 {
            return true;
        }
        match incoming {
            Some(method) => self.0 & method.0 != 0,
            None => false,
        }
    }

    /// Whether a recognized method is a member of this set.
    #[must_use]
    pub fn contains(self, method: MethodSet) -> bool {
        self.allows(Some(method))
    }

    /// Whether two sets admit at least one common method.
    ///
    /// True if either side carries `ALLOW_ALL`, or the intersection of the
    /// plain method bits is non-empty. This is the test registration-time
    /// conflict detection uses.
    #[must_use]
    pub fn overlaps(self, other: MethodSet) -> bool {
        if (self.0 | other.0) & Self::ALLOW_ALL.0 != 0 {
            return true;
        }
        self.0 & other.0 & !Self::ALLOW_ALL.0 != 0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MethodSet {
    type Output = MethodSet;

    fn bitor(self, rhs: MethodSet) -> MethodSet {
        self.union(rhs)
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 & Self::ALLOW_ALL.0 != 0 {
            return write!(f, "ALLOW_ALL");
        }
        if self.0 == 0 {
            return write!(f, "NONE");
        }
        let mut first = true;
        for (set, name) in Self::NAMED {
            if self.0 & set.0 != 0 {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_exact_names() {
        assert_eq!(MethodSet::parse_token("GET"), Some(MethodSet::GET));
        assert_eq!(MethodSet::parse_token("OPTIONS"), Some(MethodSet::OPTIONS));
        assert_eq!(MethodSet::parse_token("get"), None);
        assert_eq!(MethodSet::parse_token("TRACE"), None);
        assert_eq!(MethodSet::parse_token(""), None);
    }

    #[test]
    fn test_parse_token_malformed() {
        // Not valid HTTP method tokens at all, rejected by the http parser.
        assert_eq!(MethodSet::parse_token("G ET"), None);
        assert_eq!(MethodSet::parse_token("GET\r\n"), None);
    }

    #[test]
    fn test_parse_token_agrees_with_from_method() {
        for (set, name) in MethodSet::NAMED {
            assert_eq!(MethodSet::parse_token(name), Some(set));
        }
    }

    #[test]
    fn test_from_method_lowercase_is_extension() {
        use std::str::FromStr;
        assert_eq!(
            MethodSet::from_method(&Method::GET),
            Some(MethodSet::GET)
        );
        let ext = Method::from_str("get").unwrap();
        assert_eq!(MethodSet::from_method(&ext), None);
    }

    #[test]
    fn test_union_and_contains() {
        let set = MethodSet::GET | MethodSet::POST;
        assert!(set.contains(MethodSet::GET));
        assert!(set.contains(MethodSet::POST));
        assert!(!set.contains(MethodSet::DELETE));
    }

    #[test]
    fn test_allow_all_supersedes() {
        let set = MethodSet::ALLOW_ALL;
        assert!(set.contains(MethodSet::GET));
        assert!(set.allows(None));
        // combining plain bits with ALLOW_ALL changes nothing observable
        let mixed = MethodSet::ALLOW_ALL | MethodSet::PUT;
        assert!(mixed.contains(MethodSet::HEAD));
        assert!(mixed.allows(None));
    }

    #[test]
    fn test_unrecognized_never_matches_plain_set() {
        let set = MethodSet::GET | MethodSet::POST | MethodSet::DELETE;
        assert!(!set.allows(None));
    }

    #[test]
    fn test_overlaps() {
        assert!((MethodSet::GET | MethodSet::POST).overlaps(MethodSet::POST));
        assert!(!MethodSet::GET.overlaps(MethodSet::POST));
        assert!(MethodSet::ALLOW_ALL.overlaps(MethodSet::GET));
        assert!(MethodSet::GET.overlaps(MethodSet::ALLOW_ALL));
        assert!(MethodSet::ALLOW_ALL.overlaps(MethodSet::ALLOW_ALL));
    }

    #[test]
    fn test_display() {
        assert_eq!((MethodSet::GET | MethodSet::POST).to_string(), "GET|POST");
        assert_eq!(MethodSet::ALLOW_ALL.to_string(), "ALLOW_ALL");
        assert_eq!((MethodSet::ALLOW_ALL | MethodSet::GET).to_string(), "ALLOW_ALL");
        assert_eq!(MethodSet::NONE.to_string(), "NONE");
    }
}
