//! Handlers that touch only local session state. They always succeed.

use time::macros::format_description;
use time::OffsetDateTime;

use crate::commands::{DispatchOutcome, COMMANDS};
use crate::render::RenderedLine;
use crate::session::{SessionState, Theme};

pub fn help() -> DispatchOutcome {
    let names: Vec<&str> = COMMANDS.iter().map(|spec| spec.name).collect();
    DispatchOutcome::line(RenderedLine::out(format!(
        "Available commands: {}",
        names.join(", ")
    )))
}

pub fn man() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(
        "Opening manual... see /docs/manual.html on the engine host",
    ))
}

pub fn pwd(session: &SessionState) -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(session.cwd.clone()))
}

pub fn history(session: &SessionState) -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(session.history().join("\n")))
}

pub fn whoami(session: &SessionState) -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(session.user.clone()))
}

pub fn uptime(session: &SessionState) -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(format!(
        "up {}m, 1 user",
        session.uptime_minutes()
    )))
}

pub fn date() -> DispatchOutcome {
    let format = format_description!(
        "[weekday repr:short] [month repr:short] [day] [year] [hour]:[minute]:[second]"
    );
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let text = now
        .format(format)
        .unwrap_or_else(|_| "unknown date".to_string());
    DispatchOutcome::line(RenderedLine::out(text))
}

pub fn banner(text: &str) -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(format!("=== {text} ===")))
}

pub fn cowsay(text: &str) -> DispatchOutcome {
    let cow = format!(
        " < {text} >\n  \\ ^__^\n   \\(oo)\\_______\n    (__)\\       )\\/\\\n        ||----w |\n        ||     ||"
    );
    DispatchOutcome::line(RenderedLine::out(cow))
}

pub fn fortune() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(
        "Success is not final, failure is not fatal.",
    ))
}

pub fn cal() -> DispatchOutcome {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let header = now
        .format(format_description!("   [month repr:short] [year]"))
        .unwrap_or_else(|_| "   calendar".to_string());
    DispatchOutcome::line(RenderedLine::out(format!(
        "{header}\nSu Mo Tu We Th Fr Sa\n 1  2  3  4  5  6  7"
    )))
}

pub fn theme(session: &mut SessionState, name: Option<&str>) -> DispatchOutcome {
    session.theme = Theme::from_name(name.unwrap_or("default"));
    DispatchOutcome::line(RenderedLine::success(format!(
        "Theme set to {}.",
        session.theme.label()
    )))
}

pub fn sudo() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(
        "Nice try, but you are already root.",
    ))
}

pub fn uname() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out("Expresso Linux x86_64"))
}

pub fn hostname(session: &SessionState) -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(format!("{}-node", session.hostname)))
}

pub fn id(session: &SessionState) -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(format!(
        "uid=0({u}) gid=0({u})",
        u = session.user
    )))
}

#[cfg(test)]
mod tests {
    use super::{banner, help, pwd, theme, whoami};
    use crate::render::LineKind;
    use crate::session::{SessionState, Theme};

    #[test]
    fn help_lists_every_registered_command() {
        let outcome = help();
        let text = &outcome.lines[0].text;
        for name in ["ls", "nano", "bc", "matrix", "sudo"] {
            assert!(text.contains(name), "help is missing {name}");
        }
    }

    #[test]
    fn pwd_and_whoami_reflect_session() {
        let mut session = SessionState::default();
        session.change_dir(Some("srv"));
        assert_eq!(pwd(&session).lines[0].text, "/srv");
        assert_eq!(whoami(&session).lines[0].text, "root");
    }

    #[test]
    fn banner_wraps_text() {
        assert_eq!(banner("hi there").lines[0].text, "=== hi there ===");
    }

    #[test]
    fn theme_switches_and_defaults() {
        let mut session = SessionState::default();
        let outcome = theme(&mut session, Some("red"));
        assert_eq!(session.theme, Theme::Red);
        assert_eq!(outcome.lines[0].kind, LineKind::Success);
        theme(&mut session, None);
        assert_eq!(session.theme, Theme::Default);
        theme(&mut session, Some("mauve"));
        assert_eq!(session.theme, Theme::Default);
    }
}
