//! Backend endpoint URL, split into what a TCP/HTTP client needs.
//!
//! Only the `http[s]://host[:port][/path][?query][#fragment]` shape is
//! accepted; userinfo and bracketed IPv6 literals are rejected. The fragment
//! never reaches the server and is dropped.

use core::fmt;
use core::net::Ipv4Addr;

use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointError {
    #[error("URL has no scheme")]
    MissingScheme,
    #[error("only http and https URLs are supported")]
    UnsupportedScheme,
    #[error("URL has an empty host")]
    EmptyHost,
    #[error("URL host is not a valid hostname or IPv4 address")]
    InvalidHost,
    #[error("URL port is not a number in 1..=65535")]
    InvalidPort,
    #[error("URL must not carry credentials")]
    Userinfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub const fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host<'a> {
    Ipv4(Ipv4Addr),
    Name(&'a str),
}

impl fmt::Display for Host<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Ipv4(addr) => write!(f, "{addr}"),
            Host::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub scheme: Scheme,
    pub host: Host<'a>,
    pub port: u16,
    /// Always starts with `/`.
    pub path: &'a str,
    /// Text after `?`, without the `?`.
    pub query: Option<&'a str>,
}

impl<'a> Endpoint<'a> {
    pub fn parse(url: &'a str) -> Result<Self, EndpointError> {
        let (scheme, rest) = url.split_once("://").ok_or(EndpointError::MissingScheme)?;
        let scheme = if scheme.eq_ignore_ascii_case("http") {
            Scheme::Http
        } else if scheme.eq_ignore_ascii_case("https") {
            Scheme::Https
        } else {
            return Err(EndpointError::UnsupportedScheme);
        };

        let rest = match rest.split_once('#') {
            Some((before, _fragment)) => before,
            None => rest,
        };
        let (authority, target) = match rest.find(['/', '?']) {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };
        let path = if path.is_empty() { "/" } else { path };

        if authority.contains('@') {
            return Err(EndpointError::Userinfo);
        }
        if authority.starts_with('[') {
            return Err(EndpointError::InvalidHost);
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(EndpointError::InvalidPort);
                }
                let port = port.parse::<u16>().map_err(|_| EndpointError::InvalidPort)?;
                if port == 0 {
                    return Err(EndpointError::InvalidPort);
                }
                (host, port)
            }
            None => (authority, scheme.default_port()),
        };

        Ok(Self {
            scheme,
            host: parse_host(host)?,
            port,
            path,
            query,
        })
    }

    /// The address to connect to without a DNS lookup, if the host is a literal.
    pub fn ip(&self) -> Option<Ipv4Addr> {
        match self.host {
            Host::Ipv4(addr) => Some(addr),
            Host::Name(_) => None,
        }
    }

    pub fn has_default_port(&self) -> bool {
        self.port == self.scheme.default_port()
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme.as_str(), self.host)?;
        if !self.has_default_port() {
            write!(f, ":{}", self.port)?;
        }
        f.write_str(self.path)?;
        if let Some(query) = self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

fn parse_host(host: &str) -> Result<Host<'_>, EndpointError> {
    if host.is_empty() {
        return Err(EndpointError::EmptyHost);
    }
    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Ok(Host::Ipv4(addr));
    }
    // Dotted digits that failed to parse as IPv4 ("192.168.1.300") are a typo,
    // not a hostname.
    if host.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return Err(EndpointError::InvalidHost);
    }
    let label_ok = |label: &str| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    };
    if host.split('.').all(label_ok) {
        Ok(Host::Name(host))
    } else {
        Err(EndpointError::InvalidHost)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn lan_php_endpoint() {
        let ep = Endpoint::parse("http://192.168.1.123/SmartGarden/backend-api/routes/sensor.php")
            .unwrap();
        assert_eq!(ep.scheme, Scheme::Http);
        assert_eq!(ep.ip(), Some(Ipv4Addr::new(192, 168, 1, 123)));
        assert_eq!(ep.port, 80);
        assert_eq!(ep.path, "/SmartGarden/backend-api/routes/sensor.php");
    }

    #[test]
    fn hostname_with_port_and_query() {
        let ep = Endpoint::parse("https://garden.local:8443/api/sensor?device=esp32").unwrap();
        assert_eq!(ep.scheme, Scheme::Https);
        assert_eq!(ep.host, Host::Name("garden.local"));
        assert_eq!(ep.ip(), None);
        assert_eq!(ep.port, 8443);
        assert_eq!(ep.path, "/api/sensor");
        assert_eq!(ep.query, Some("device=esp32"));
        assert_eq!(ep.to_string(), "https://garden.local:8443/api/sensor?device=esp32");
    }

    #[test]
    fn query_or_fragment_without_path() {
        let ep = Endpoint::parse("http://192.168.1.123?device=esp32").unwrap();
        assert_eq!(ep.ip(), Some(Ipv4Addr::new(192, 168, 1, 123)));
        assert_eq!(ep.path, "/");
        assert_eq!(ep.query, Some("device=esp32"));
        assert_eq!(ep.to_string(), "http://192.168.1.123/?device=esp32");

        let ep = Endpoint::parse("http://host#x").unwrap();
        assert_eq!(ep.host, Host::Name("host"));
        assert_eq!(ep.path, "/");
        assert_eq!(ep.query, None);

        let ep = Endpoint::parse("http://host:8080/a/b?q=1#frag").unwrap();
        assert_eq!(ep.port, 8080);
        assert_eq!(ep.path, "/a/b");
        assert_eq!(ep.query, Some("q=1"));

        assert_eq!(
            Endpoint::parse("http://host:81?q"),
            Ok(Endpoint {
                scheme: Scheme::Http,
                host: Host::Name("host"),
                port: 81,
                path: "/",
                query: Some("q"),
            })
        );
    }

    #[test]
    fn bare_host_gets_root_path() {
        let ep = Endpoint::parse("HTTPS://example.com").unwrap();
        assert_eq!(ep.scheme, Scheme::Https);
        assert_eq!(ep.port, 443);
        assert_eq!(ep.path, "/");
        assert_eq!(ep.query, None);
    }

    #[test]
    fn display_round_trips_canonical_form() {
        let url = "http://192.168.1.123:8080/routes/sensor.php";
        assert_eq!(Endpoint::parse(url).unwrap().to_string(), url);
        assert_eq!(
            Endpoint::parse("http://10.0.0.2:80/x").unwrap().to_string(),
            "http://10.0.0.2/x"
        );
    }

    #[test]
    fn rejects_malformed_urls() {
        assert_eq!(Endpoint::parse("192.168.1.123/x"), Err(EndpointError::MissingScheme));
        assert_eq!(Endpoint::parse("ftp://host/x"), Err(EndpointError::UnsupportedScheme));
        assert_eq!(Endpoint::parse("http:///x"), Err(EndpointError::EmptyHost));
        assert_eq!(Endpoint::parse("http://:80/x"), Err(EndpointError::EmptyHost));
        assert_eq!(Endpoint::parse("http://host:0/"), Err(EndpointError::InvalidPort));
        assert_eq!(Endpoint::parse("http://host:99999/"), Err(EndpointError::InvalidPort));
        assert_eq!(Endpoint::parse("http://host:/"), Err(EndpointError::InvalidPort));
        assert_eq!(Endpoint::parse("http://host:+80/x"), Err(EndpointError::InvalidPort));
        assert_eq!(Endpoint::parse("http://host: 80/x"), Err(EndpointError::InvalidPort));
        assert_eq!(Endpoint::parse("http://host:+80?q"), Err(EndpointError::InvalidPort));
        assert_eq!(Endpoint::parse("http://user:pw@host/"), Err(EndpointError::Userinfo));
        assert_eq!(Endpoint::parse("http://192.168.1.300/"), Err(EndpointError::InvalidHost));
        assert_eq!(Endpoint::parse("http://bad host/"), Err(EndpointError::InvalidHost));
        assert_eq!(Endpoint::parse("http://[::1]/"), Err(EndpointError::InvalidHost));
        assert_eq!(Endpoint::parse("http://-garden.local/"), Err(EndpointError::InvalidHost));
    }
}
