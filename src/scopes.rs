//! OAuth permission scopes and the space separated scope string.
use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub alias: Cow<'static, str>,
    pub description: Option<Cow<'static, str>>,
}

impl Scope {
    const fn known(alias: &'static str, description: &'static str) -> Self {
        Scope {
            alias: Cow::Borrowed(alias),
            description: Some(Cow::Borrowed(description)),
        }
    }

    pub const PUBLIC: Scope = Scope::known("public", "Access public videos and public user information.");
    pub const PRIVATE: Scope = Scope::known("private", "Access private videos and private user information.");
    pub const PURCHASED: Scope = Scope::known("purchased", "Access the user's Vimeo On Demand purchase history.");
    pub const CREATE: Scope = Scope::known("create", "Create new videos, channels, albums and groups.");
    pub const EDIT: Scope = Scope::known("edit", "Edit existing videos, channels, albums and groups.");
    pub const DELETE: Scope = Scope::known("delete", "Delete videos, channels, albums and groups.");
    pub const INTERACT: Scope = Scope::known("interact", "Interact with videos on behalf of the user, such as liking or commenting.");
    pub const UPLOAD: Scope = Scope::known("upload", "Upload videos.");
    pub const VIDEO_FILES: Scope = Scope::known("video_files", "Access the source and transcoded files of the user's videos.");
    pub const STATS: Scope = Scope::known("stats", "Access video statistics.");
    pub const EMAIL: Scope = Scope::known("email", "Access the user's email address.");

    /// Every scope known to the library, in documentation order.
    pub const ALL: &'static [Scope] = &[
        Scope::PUBLIC,
        Scope::PRIVATE,
        Scope::PURCHASED,
        Scope::CREATE,
        Scope::EDIT,
        Scope::DELETE,
        Scope::INTERACT,
        Scope::UPLOAD,
        Scope::VIDEO_FILES,
        Scope::STATS,
        Scope::EMAIL,
    ];

    /// Placeholder for an alias missing from [`Scope::ALL`].
    pub fn unknown(alias: impl Into<String>) -> Self {
        Scope {
            alias: Cow::Owned(alias.into()),
            description: None,
        }
    }

    pub fn lookup(alias: &str) -> Option<&'static Scope> {
        Scope::ALL.iter().find(|scope| scope.alias == alias)
    }

    /// Catalog entry for `alias`, or an unknown placeholder.
    pub fn from_alias(alias: &str) -> Scope {
        Scope::lookup(alias)
            .cloned()
            .unwrap_or_else(|| Scope::unknown(alias))
    }

    pub fn is_known(&self) -> bool {
        Scope::lookup(&self.alias).is_some()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.alias)
    }
}

/// Ordered list of scopes. Duplicates are kept until [`ScopeCollection::dedup`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeCollection {
    scopes: Vec<Scope>,
}

impl ScopeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits on whitespace and resolves each alias against the catalog.
    pub fn parse(value: &str) -> Self {
        value.split_whitespace().map(Scope::from_alias).collect()
    }

    pub fn add(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    pub fn with(mut self, scope: Scope) -> Self {
        self.add(scope);
        self
    }

    /// Appends every scope of `other`.
    pub fn union(mut self, other: &ScopeCollection) -> Self {
        self.scopes.extend(other.scopes.iter().cloned());
        self
    }

    /// Drops repeated aliases, keeping the first occurrence.
    pub fn dedup(&mut self) {
        let mut seen = Vec::with_capacity(self.scopes.len());
        self.scopes.retain(|scope| {
            if seen.contains(&scope.alias) {
                false
            } else {
                seen.push(scope.alias.clone());
                true
            }
        });
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.scopes.iter().any(|scope| scope.alias == alias)
    }

    pub fn items(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn aliases(&self) -> Vec<&str> {
        self.scopes.iter().map(|scope| scope.alias.as_ref()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scope> {
        self.scopes.iter()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl fmt::Display for ScopeCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.aliases().join(" "))
    }
}

impl FromStr for ScopeCollection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ScopeCollection::parse(s))
    }
}

impl From<Scope> for ScopeCollection {
    fn from(scope: Scope) -> Self {
        ScopeCollection { scopes: vec![scope] }
    }
}

impl From<Vec<Scope>> for ScopeCollection {
    fn from(scopes: Vec<Scope>) -> Self {
        ScopeCollection { scopes }
    }
}

impl From<&[Scope]> for ScopeCollection {
    fn from(scopes: &[Scope]) -> Self {
        ScopeCollection { scopes: scopes.to_vec() }
    }
}

impl FromIterator<Scope> for ScopeCollection {
    fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
        ScopeCollection { scopes: iter.into_iter().collect() }
    }
}

impl Extend<Scope> for ScopeCollection {
    fn extend<I: IntoIterator<Item = Scope>>(&mut self, iter: I) {
        self.scopes.extend(iter);
    }
}

impl IntoIterator for ScopeCollection {
    type Item = Scope;
    type IntoIter = std::vec::IntoIter<Scope>;

    fn into_iter(self) -> Self::IntoIter {
        self.scopes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScopeCollection {
    type Item = &'a Scope;
    type IntoIter = std::slice::Iter<'a, Scope>;

    fn into_iter(self) -> Self::IntoIter {
        self.scopes.iter()
    }
}
