/// PROTECTED_PREFIXES
///
/// The page sections of the front-end that require a session before they are served.
/// Order is significant only for reporting: the first matching prefix is the one logged.
pub const PROTECTED_PREFIXES: [&str; 7] = [
    "/dashboard",
    "/projects",
    "/settings",
    "/teams",
    "/chat",
    "/meetings",
    "/files",
];

/// The process-wide protected path set. Evaluated at compile time, so a malformed
/// entry in `PROTECTED_PREFIXES` fails the build instead of a request.
pub const PROTECTED: ProtectedPaths = ProtectedPaths::new(&PROTECTED_PREFIXES);

/// ProtectedPaths
///
/// An immutable, ordered list of path prefixes. A path is protected when it equals
/// one of the prefixes or continues it past a `/` segment boundary, which is what the
/// deployment matcher `/<prefix>/:path*` selects.
#[derive(Debug, Clone, Copy)]
pub struct ProtectedPaths {
    prefixes: &'static [&'static str],
}

impl ProtectedPaths {
    /// new
    ///
    /// Builds the set from a static table.
    ///
    /// # Panics
    /// Panics (at compile time when used in a `const`) if a prefix is empty, does not start
    /// with `/`, ends with `/`, or contains a query, fragment, glob or whitespace character.
    pub const fn new(prefixes: &'static [&'static str]) -> Self {
        let mut i = 0;
        while i < prefixes.len() {
            if !is_valid_prefix(prefixes[i]) {
                panic!("malformed protected path prefix");
            }
            i += 1;
        }
        Self { prefixes }
    }

    /// protection
    ///
    /// Classifies a raw request path. Matching runs on the path as the page server will
    /// resolve it on disk (see [`clean_path`]), so `//files/x`, `/%66iles/x` and
    /// `/./files/x` are all covered by `/files`. A path that does not percent-decode to
    /// UTF-8 cannot be resolved and is gated as well.
    pub fn protection(&self, path: &str) -> Protection {
        let Some(cleaned) = clean_path(path) else {
            return Protection::Undecodable;
        };
        self.prefixes
            .iter()
            .copied()
            .find(|prefix| {
                cleaned
                    .strip_prefix(*prefix)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
            .map_or(Protection::Open, Protection::Prefix)
    }

    /// matcher_patterns
    ///
    /// Renders the set as deployment matcher globs (`/dashboard/:path*`), used for the
    /// startup log line so operators can see exactly what is gated.
    pub fn matcher_patterns(&self) -> Vec<String> {
        self.prefixes
            .iter()
            .map(|prefix| format!("{prefix}/:path*"))
            .collect()
    }
}

/// Protection
///
/// What the protected path set says about one request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// Outside every protected section.
    Open,
    /// Inside the section rooted at this prefix.
    Prefix(&'static str),
    /// Not valid percent-encoded UTF-8; cannot be resolved, so it is never treated as open.
    Undecodable,
}

impl Protection {
    pub fn requires_session(&self) -> bool {
        !matches!(self, Protection::Open)
    }
}

/// clean_path
///
/// Canonical form of a request path: percent-decoded (so `%2F` splits segments), empty and
/// `.` segments dropped, `..` popping the previous segment without climbing above the root.
/// Always starts with `/` and never ends with one, except for the root itself.
///
/// Returns `None` when the decoded bytes are not UTF-8.
pub fn clean_path(path: &str) -> Option<String> {
    let decoded = urlencoding::decode(path).ok()?;
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    Some(format!("/{}", segments.join("/")))
}

const fn is_valid_prefix(prefix: &str) -> bool {
    let bytes = prefix.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'/' || bytes[bytes.len() - 1] == b'/' {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'?' | b'#' | b'*' | b' ' | b'\t' => return false,
            _ => {}
        }
        i += 1;
    }
    true
}
