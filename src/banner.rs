//! Startup banner and session summary display.

use crate::consts::{AUTHOR, REPO};

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub endpoint: &'a str,
    pub settings: &'a str,
}

/// Build the startup banner text.
pub fn banner_text(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║          M A T H   A G E N T          ║
   ║     ask a question, get an answer     ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   repo      {}
   endpoint  {}
   settings  {}

   type a question and press enter, /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        REPO,
        info.endpoint,
        info.settings,
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

/// Print the session summary (questions asked + farewell).
pub fn print_session_summary(asked: u64) {
    if asked > 0 {
        println!("session: {asked} question(s) asked");
    }
    println!("goodbye.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_shows_endpoint_and_settings() {
        let text = banner_text(&BannerInfo {
            endpoint: "http://127.0.0.1:8000/ask",
            settings: "ephemeral",
        });
        assert!(text.contains("http://127.0.0.1:8000/ask"));
        assert!(text.contains("ephemeral"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn print_session_summary_does_not_panic() {
        print_session_summary(3);
        print_session_summary(0);
    }
}
