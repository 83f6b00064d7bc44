use std::fmt;

/// Screens reachable by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    SignUp,
    Library,
    VoiceEffects,
    VoiceClone,
    NoiseRoom,
    PrankCalling,
    Settings,
    Profile,
    CreateMusic,
    LyricsCreator,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Home,
            "/signin" => Route::SignIn,
            "/signup" => Route::SignUp,
            "/library" => Route::Library,
            "/voice-effects" => Route::VoiceEffects,
            "/voice-clone" => Route::VoiceClone,
            "/noise-room" => Route::NoiseRoom,
            "/prank-room" | "/prank-calling" => Route::PrankCalling,
            "/settings" => Route::Settings,
            "/profile" => Route::Profile,
            "/create-music" => Route::CreateMusic,
            "/lyrics-creator" => Route::LyricsCreator,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::SignIn => "/signin",
            Route::SignUp => "/signup",
            Route::Library => "/library",
            Route::VoiceEffects => "/voice-effects",
            Route::VoiceClone => "/voice-clone",
            Route::NoiseRoom => "/noise-room",
            Route::PrankCalling => "/prank-calling",
            Route::Settings => "/settings",
            Route::Profile => "/profile",
            Route::CreateMusic => "/create-music",
            Route::LyricsCreator => "/lyrics-creator",
            Route::NotFound(path) => path,
        }
    }

    /// Reachable without signing in
    pub fn is_public(&self) -> bool {
        matches!(self, Route::SignIn | Route::SignUp)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/library"), Route::Library);
        assert_eq!(Route::parse("/voice-clone/"), Route::VoiceClone);
        assert_eq!(Route::parse("/lyrics-creator"), Route::LyricsCreator);
    }

    #[test]
    fn test_prank_aliases_share_a_screen() {
        assert_eq!(Route::parse("/prank-room"), Route::PrankCalling);
        assert_eq!(Route::parse("/prank-calling"), Route::PrankCalling);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(
            Route::parse("/nope"),
            Route::NotFound("/nope".to_string())
        );
        assert_eq!(Route::parse("/nope").to_string(), "/nope");
    }

    #[test]
    fn test_public_routes() {
        assert!(Route::SignIn.is_public());
        assert!(Route::SignUp.is_public());
        assert!(!Route::Home.is_public());
        assert!(!Route::NotFound("/x".into()).is_public());
    }
}
