use serde::Serialize;

/// How a stream is authorised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessKind {
    /// The URL carries its own `sign=` token.
    Direct,
    /// The media host wants the `signCookie` value as a Cookie header.
    CookieProtected,
}

impl AccessKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Direct => "DIRECT (pre-signed)",
            Self::CookieProtected => "COOKIE-PROTECTED",
        }
    }

    /// Container used when remuxing with ffmpeg.
    fn output_file(&self) -> &'static str {
        match self {
            Self::Direct => "out.mp4",
            Self::CookieProtected => "out.mkv",
        }
    }
}

/// A URL plus the request headers a player must send to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackInstruction {
    pub access: AccessKind,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl PlaybackInstruction {
    pub fn direct(url: impl Into<String>) -> Self {
        Self {
            access: AccessKind::Direct,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    pub fn cookie_protected(url: impl Into<String>, referer: &str, cookie: &str) -> Self {
        Self {
            access: AccessKind::CookieProtected,
            url: url.into(),
            headers: vec![
                ("Referer".to_string(), referer.to_string()),
                ("Cookie".to_string(), cookie.to_string()),
            ],
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn mpv_command(&self) -> String {
        let mut cmd = format!("mpv '{}'", self.url);
        for (name, value) in &self.headers {
            cmd.push_str(&format!(" --http-header-fields='{}: {}'", name, value));
        }
        cmd
    }

    /// ffmpeg takes all headers in one argument, separated by a literal `\r\n`.
    pub fn ffmpeg_command(&self) -> String {
        let mut cmd = String::from("ffmpeg ");
        if !self.headers.is_empty() {
            let joined = self
                .headers
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect::<Vec<_>>()
                .join("\\r\\n");
            cmd.push_str(&format!("-headers \"{}\" ", joined));
        }
        cmd.push_str(&format!(
            "-i '{}' -c copy {}",
            self.url,
            self.access.output_file()
        ));
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://api.inmoviebox.com";

    #[test]
    fn test_direct_commands_have_no_headers() {
        let instruction = PlaybackInstruction::direct("https://cdn.example/v.mp4?sign=abc");
        assert_eq!(
            instruction.mpv_command(),
            "mpv 'https://cdn.example/v.mp4?sign=abc'"
        );
        assert_eq!(
            instruction.ffmpeg_command(),
            "ffmpeg -i 'https://cdn.example/v.mp4?sign=abc' -c copy out.mp4"
        );
    }

    #[test]
    fn test_cookie_commands_carry_referer_and_cookie() {
        let instruction =
            PlaybackInstruction::cookie_protected("https://cdn.example/v.mpd", ORIGIN, "foo=bar");

        assert_eq!(instruction.header("cookie"), Some("foo=bar"));
        assert_eq!(instruction.header("Referer"), Some(ORIGIN));
        assert_eq!(
            instruction.mpv_command(),
            "mpv 'https://cdn.example/v.mpd' \
             --http-header-fields='Referer: https://api.inmoviebox.com' \
             --http-header-fields='Cookie: foo=bar'"
        );
        assert_eq!(
            instruction.ffmpeg_command(),
            "ffmpeg -headers \"Referer: https://api.inmoviebox.com\\r\\nCookie: foo=bar\" \
             -i 'https://cdn.example/v.mpd' -c copy out.mkv"
        );
    }
}
