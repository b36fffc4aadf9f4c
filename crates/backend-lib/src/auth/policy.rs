// ============================
// crates/backend-lib/src/auth/policy.rs
// ============================
//! Request-path authorization rules.
//!
//! Rules are evaluated in order and the first matching pattern decides.
//! Nothing here knows about axum; the middleware feeds it plain paths.

/// What a request needs before it reaches a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    PermitAll,
    Authenticated,
}

/// How an unauthenticated caller is turned away
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Challenge {
    /// Browser paths are sent to the login page
    Redirect(&'static str),
    /// API paths get a status code
    Unauthorized,
}

/// Path pattern: literal segments, `*` for exactly one segment, trailing `**` for any suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Any,
    Rest,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|s| match s {
                "**" => Segment::Rest,
                "*" => Segment::Any,
                lit => Segment::Literal(lit.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut parts = split(path);
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::Any => {
                    if parts.next().is_none() {
                        return false;
                    }
                },
                Segment::Literal(lit) => {
                    if parts.next() != Some(lit.as_str()) {
                        return false;
                    }
                },
            }
        }
        parts.next().is_none()
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// One (pattern, requirement) pair
#[derive(Debug, Clone)]
pub struct AccessRule {
    pub pattern: PathPattern,
    pub requirement: Requirement,
}

/// Ordered rule table
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    api_prefix: PathPattern,
    login_page: &'static str,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::builder()
            .permit_all("/")
            .permit_all("/login")
            .permit_all("/logout")
            .permit_all("/script.js")
            .permit_all("/api/login")
            .permit_all("/api/login/register")
            .authenticated("/**")
            .build()
    }
}

impl AccessPolicy {
    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder { rules: Vec::new() }
    }

    /// First matching rule wins; unmatched paths need authentication
    pub fn evaluate(&self, path: &str) -> Requirement {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map_or(Requirement::Authenticated, |rule| rule.requirement)
    }

    /// Response kind for an unauthenticated request to `path`
    pub fn challenge(&self, path: &str) -> Challenge {
        if self.api_prefix.matches(path) {
            Challenge::Unauthorized
        } else {
            Challenge::Redirect(self.login_page)
        }
    }
}

/// Builder keeping rules in insertion order
pub struct AccessPolicyBuilder {
    rules: Vec<AccessRule>,
}

impl AccessPolicyBuilder {
    pub fn rule(mut self, pattern: &str, requirement: Requirement) -> Self {
        self.rules.push(AccessRule { pattern: PathPattern::new(pattern), requirement });
        self
    }

    pub fn permit_all(self, pattern: &str) -> Self {
        self.rule(pattern, Requirement::PermitAll)
    }

    pub fn authenticated(self, pattern: &str) -> Self {
        self.rule(pattern, Requirement::Authenticated)
    }

    pub fn build(self) -> AccessPolicy {
        AccessPolicy {
            rules: self.rules,
            api_prefix: PathPattern::new("/api/**"),
            login_page: "/login",
        }
    }
}
