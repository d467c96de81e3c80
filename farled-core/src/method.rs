//! HTTP request methods.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// HTTP request methods as defined in RFC 7231 and common extensions.
///
/// The derived `Ord` gives methods a stable order inside a route's method
/// set, which keeps route dumps and structural equality deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    /// GET method: requests a representation of the specified resource.
    GET,
    /// HEAD method: same as GET but only transfers the status line and header section.
    HEAD,
    /// POST method: submits data to be processed to the identified resource.
    POST,
    /// PUT method: replaces all current representations of the target resource.
    PUT,
    /// PATCH method: applies partial modifications to a resource.
    PATCH,
    /// DELETE method: deletes the specified resource.
    DELETE,
    /// OPTIONS method: describes the communication options for the target resource.
    OPTIONS,
    /// TRACE method: performs a message loop-back test along the path to the target.
    TRACE,
    /// CONNECT method: establishes a tunnel to the server identified by the target.
    CONNECT,
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "OPTIONS" => Ok(Method::OPTIONS),
            "TRACE" => Ok(Method::TRACE),
            "CONNECT" => Ok(Method::CONNECT),
            _ => Err(ConfigError::InvalidMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
