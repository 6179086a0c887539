use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// Result prefix of an SPF directive (RFC 7208 §4.6.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Qualifier {
    #[default]
    Pass,
    Fail,
    SoftFail,
    Neutral,
}

impl Qualifier {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Qualifier::Pass),
            '-' => Some(Qualifier::Fail),
            '~' => Some(Qualifier::SoftFail),
            '?' => Some(Qualifier::Neutral),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Qualifier::Pass => '+',
            Qualifier::Fail => '-',
            Qualifier::SoftFail => '~',
            Qualifier::Neutral => '?',
        }
    }

    /// Prefix written in front of generated terms. `+` is the default and
    /// is left implicit.
    pub fn prefix(&self) -> &'static str {
        match self {
            Qualifier::Pass => "",
            Qualifier::Fail => "-",
            Qualifier::SoftFail => "~",
            Qualifier::Neutral => "?",
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MechanismKind {
    A,
    Mx,
    Ip4,
    Ip6,
    Include,
    Redirect,
    Exists,
    Ptr,
    All,
}

impl MechanismKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MechanismKind::A => "a",
            MechanismKind::Mx => "mx",
            MechanismKind::Ip4 => "ip4",
            MechanismKind::Ip6 => "ip6",
            MechanismKind::Include => "include",
            MechanismKind::Redirect => "redirect",
            MechanismKind::Exists => "exists",
            MechanismKind::Ptr => "ptr",
            MechanismKind::All => "all",
        }
    }

    /// Mechanism names written as `name[:arg]`. `redirect` is a modifier
    /// (`redirect=arg`) and is not part of this set.
    fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "a" => MechanismKind::A,
            "mx" => MechanismKind::Mx,
            "ip4" => MechanismKind::Ip4,
            "ip6" => MechanismKind::Ip6,
            "include" => MechanismKind::Include,
            "exists" => MechanismKind::Exists,
            "ptr" => MechanismKind::Ptr,
            "all" => MechanismKind::All,
            _ => return None,
        };
        Some(kind)
    }

    /// Terms that cost a DNS lookup at evaluation time (RFC 7208 §4.6.4).
    pub fn requires_dns_lookup(&self) -> bool {
        matches!(
            self,
            MechanismKind::A
                | MechanismKind::Mx
                | MechanismKind::Include
                | MechanismKind::Redirect
                | MechanismKind::Exists
                | MechanismKind::Ptr
        )
    }
}

impl fmt::Display for MechanismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One parsed SPF term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mechanism {
    pub qualifier: Qualifier,
    pub kind: MechanismKind,
    pub argument: Option<String>,
    /// `a` / `mx` dual CIDR lengths (`a:host/24//64`).
    pub ip4_prefix: Option<u8>,
    pub ip6_prefix: Option<u8>,
}

impl Mechanism {
    pub fn new(qualifier: Qualifier, kind: MechanismKind, argument: Option<String>) -> Self {
        Self {
            qualifier,
            kind,
            argument,
            ip4_prefix: None,
            ip6_prefix: None,
        }
    }

    /// Parses a single whitespace-free token.
    ///
    /// Returns `None` for anything that is not a recognised mechanism or the
    /// `redirect` modifier; callers keep such tokens verbatim.
    pub fn parse(token: &str) -> Option<Self> {
        if token.is_empty() {
            return None;
        }

        if let Some((name, value)) = token.split_once('=') {
            if name.eq_ignore_ascii_case("redirect") && !value.is_empty() {
                return Some(Self::new(
                    Qualifier::Pass,
                    MechanismKind::Redirect,
                    Some(value.to_string()),
                ));
            }
            return None;
        }

        let mut chars = token.chars();
        let (qualifier, rest) = match chars.next().and_then(Qualifier::from_char) {
            Some(q) => (q, chars.as_str()),
            None => (Qualifier::Pass, token),
        };

        let (head, argument) = match rest.split_once(':') {
            Some((head, arg)) => (head, Some(arg)),
            None => (rest, None),
        };
        let (name, cidr) = match head.find('/') {
            Some(i) => (&head[..i], Some(&head[i..])),
            None => (head, None),
        };

        let kind = MechanismKind::from_name(name)?;

        match kind {
            MechanismKind::A | MechanismKind::Mx => {
                let mut mechanism = Self::new(qualifier, kind, None);
                match (argument, cidr) {
                    (Some(_), Some(_)) => return None,
                    (Some(arg), None) => {
                        let (domain, v4, v6) = split_dual_cidr(arg)?;
                        if domain.is_empty() {
                            return None;
                        }
                        mechanism.argument = Some(domain.to_string());
                        mechanism.ip4_prefix = v4;
                        mechanism.ip6_prefix = v6;
                    }
                    (None, Some(lengths)) => {
                        let (domain, v4, v6) = split_dual_cidr(lengths)?;
                        if !domain.is_empty() {
                            return None;
                        }
                        mechanism.ip4_prefix = v4;
                        mechanism.ip6_prefix = v6;
                    }
                    (None, None) => {}
                }
                Some(mechanism)
            }
            _ if cidr.is_some() => None,
            MechanismKind::All => match argument {
                None => Some(Self::new(qualifier, kind, None)),
                Some(_) => None,
            },
            MechanismKind::Ptr => match argument {
                Some("") => None,
                arg => Some(Self::new(qualifier, kind, arg.map(str::to_string))),
            },
            _ => match argument {
                Some(arg) if !arg.is_empty() => {
                    Some(Self::new(qualifier, kind, Some(arg.to_string())))
                }
                _ => None,
            },
        }
    }

    /// Domain this mechanism applies to: its argument, or the record's own
    /// domain when omitted.
    pub fn target<'a>(&'a self, base_domain: &'a str) -> &'a str {
        self.argument.as_deref().unwrap_or(base_domain)
    }

    /// Domain to splice in during expansion.
    ///
    /// Only unqualified (or `+`) includes and redirects are expandable; a
    /// `-include:` cannot be inlined without losing its qualifier.
    pub fn expansion_target(&self) -> Option<&str> {
        match self.kind {
            MechanismKind::Include if self.qualifier == Qualifier::Pass => {
                self.argument.as_deref()
            }
            MechanismKind::Redirect => self.argument.as_deref(),
            _ => None,
        }
    }

    /// Include or redirect pointing into Microsoft 365, with any qualifier.
    pub fn references_outlook(&self) -> bool {
        matches!(self.kind, MechanismKind::Include | MechanismKind::Redirect)
            && self
                .argument
                .as_deref()
                .is_some_and(super::is_outlook_protection)
    }

    /// Static `ip4:` / `ip6:` term for one resolved address, keeping this
    /// mechanism's qualifier (always written, `+` included) and CIDR length.
    pub fn address_term(&self, address: IpAddr) -> String {
        let prefix = self.qualifier.as_char();
        match address {
            IpAddr::V4(v4) => match self.ip4_prefix {
                Some(len) => format!("{prefix}ip4:{v4}/{len}"),
                None => format!("{prefix}ip4:{v4}"),
            },
            IpAddr::V6(v6) => match self.ip6_prefix {
                Some(len) => format!("{prefix}ip6:{v6}/{len}"),
                None => format!("{prefix}ip6:{v6}"),
            },
        }
    }
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == MechanismKind::Redirect {
            return write!(f, "redirect={}", self.argument.as_deref().unwrap_or(""));
        }

        write!(f, "{}{}", self.qualifier.prefix(), self.kind)?;
        if let Some(arg) = &self.argument {
            write!(f, ":{arg}")?;
        }
        if let Some(len) = self.ip4_prefix {
            write!(f, "/{len}")?;
        }
        if let Some(len) = self.ip6_prefix {
            write!(f, "//{len}")?;
        }
        Ok(())
    }
}

/// Splits `domain/v4len//v6len` (every part optional).
fn split_dual_cidr(s: &str) -> Option<(&str, Option<u8>, Option<u8>)> {
    let (head, ip6_prefix) = match s.split_once("//") {
        Some((head, len)) => (head, Some(parse_prefix_len(len, 128)?)),
        None => (s, None),
    };
    let (domain, ip4_prefix) = match head.split_once('/') {
        Some((domain, len)) => (domain, Some(parse_prefix_len(len, 32)?)),
        None => (head, None),
    };
    Some((domain, ip4_prefix, ip6_prefix))
}

fn parse_prefix_len(s: &str, max: u8) -> Option<u8> {
    s.parse::<u8>().ok().filter(|len| *len <= max)
}
