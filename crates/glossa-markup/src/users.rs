use crate::Result;
use serde::Deserialize;
use std::collections::BTreeSet;

/// A user account as seen by the mention renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    /// Overrides the default `/user/<username>/` profile location.
    #[serde(default)]
    pub profile_url: Option<String>,
}

impl User {
    pub fn new(username: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            full_name: full_name.into(),
            profile_url: None,
        }
    }

    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    pub fn profile_url(&self) -> String {
        match &self.profile_url {
            Some(url) => url.clone(),
            None => format!("/user/{}/", self.username),
        }
    }

    /// Full name when set, otherwise the username.
    pub fn visible_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

/// Where mentioned usernames are looked up.
pub trait UserDirectory {
    /// Returns the users whose username equals any of `usernames`, in one lookup.
    ///
    /// Never called with an empty set.
    fn find_by_usernames(&self, usernames: &BTreeSet<&str>) -> Result<Vec<User>>;
}

impl<D: UserDirectory + ?Sized> UserDirectory for &D {
    fn find_by_usernames(&self, usernames: &BTreeSet<&str>) -> Result<Vec<User>> {
        (**self).find_by_usernames(usernames)
    }
}

/// A fixed list of users. Usernames are compared case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Vec<User>,
}

impl InMemoryUserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Parses a JSON array of users (`username`, optional `full_name` and `profile_url`).
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }
}

impl FromIterator<User> for InMemoryUserDirectory {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find_by_usernames(&self, usernames: &BTreeSet<&str>) -> Result<Vec<User>> {
        let wanted: BTreeSet<String> = usernames.iter().map(|u| u.to_lowercase()).collect();
        Ok(self
            .users
            .iter()
            .filter(|user| wanted.contains(&user.username.to_lowercase()))
            .cloned()
            .collect())
    }
}
