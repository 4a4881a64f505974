//! OAuth provider identities and the account linking outcomes.

use serde::Deserialize;

/// Supported OAuth providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Facebook,
    Google,
    Foursquare,
}

impl Provider {
    /// Lowercase name used in routes and stored token kinds.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Google => "google",
            Self::Foursquare => "foursquare",
        }
    }

    /// Capitalized name used in flash messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Google => "Google",
            Self::Foursquare => "Foursquare",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "facebook" => Some(Self::Facebook),
            "google" => Some(Self::Google),
            "foursquare" => Some(Self::Foursquare),
            _ => None,
        }
    }

    /// Whether the provider can be used to sign in, as opposed to only authorizing API access.
    pub fn is_sign_in(&self) -> bool {
        matches!(self, Self::Facebook | Self::Google)
    }
}

/// Identity returned by a sign-in provider, normalized across providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider: Provider,
    /// Account id at the provider.
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub picture: Option<String>,
    pub location: Option<String>,
}

/// Graph API `me` response.
#[derive(Debug, Deserialize)]
pub struct FacebookProfile {
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub location: Option<FacebookLocation>,
}

#[derive(Debug, Deserialize)]
pub struct FacebookLocation {
    pub name: Option<String>,
}

impl FacebookProfile {
    pub fn into_profile(self) -> ProviderProfile {
        let name = match (self.first_name, self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first),
            (None, Some(last)) => Some(last),
            (None, None) => self.name,
        };

        ProviderProfile {
            provider: Provider::Facebook,
            picture: Some(format!(
                "https://graph.facebook.com/{}/picture?type=large",
                self.id
            )),
            id: self.id,
            email: self.email,
            name,
            gender: self.gender,
            location: self.location.and_then(|location| location.name),
        }
    }
}

/// OpenID Connect `userinfo` response.
#[derive(Debug, Deserialize)]
pub struct GoogleProfile {
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub picture: Option<String>,
}

impl GoogleProfile {
    pub fn into_profile(self) -> ProviderProfile {
        ProviderProfile {
            provider: Provider::Google,
            id: self.sub,
            email: self.email,
            name: self.name,
            gender: self.gender,
            picture: self.picture,
            location: None,
        }
    }
}

/// What a provider callback should do, decided from who already owns what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInPlan {
    /// Logged in, and the provider account belongs to someone else.
    RejectLinkedElsewhere,
    /// Logged in; attach the provider account to `user_id`.
    Link { user_id: i32 },
    /// Not logged in; the provider account is known, sign in as its owner.
    SignInExisting { user_id: i32 },
    /// Not logged in; the profile email belongs to an account without this provider.
    RejectEmailTaken,
    /// Not logged in and nothing matches; create a new account.
    CreateAccount,
}

/// Result of executing a `SignInPlan`, consumed by the callback controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    Linked { user_id: i32 },
    SignedIn { user_id: i32 },
    Created { user_id: i32 },
    Rejected { message: String },
}
