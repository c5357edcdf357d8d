//! Command registry and dispatcher.
//!
//! A raw input line is tokenized on whitespace, the lowercased first token is
//! resolved against the command table, and the matching handler runs with the
//! full token list. The dispatcher never returns an error and never panics:
//! every failure, remote or local, becomes a rendered error line.

pub mod calc;
pub mod files;
pub mod local;
pub mod system;

use crate::remote::FileStore;
use crate::render::RenderedLine;
use crate::session::SessionState;

/// Name used in the "command not found" line.
pub const SHELL_NAME: &str = "expresso";

/// Frontend side effects a handler may request alongside its lines.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ClearScreen,
    Exit,
    OpenEditor { filename: String, seed: String },
    ToggleMatrix,
    /// Deliver `line` after `delay_ms`, without blocking anything.
    Staged { delay_ms: u64, line: RenderedLine },
}

#[derive(Debug, Default, PartialEq)]
pub struct DispatchOutcome {
    pub lines: Vec<RenderedLine>,
    pub effect: Option<Effect>,
}

impl DispatchOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn line(line: RenderedLine) -> Self {
        Self {
            lines: vec![line],
            effect: None,
        }
    }

    pub fn lines(lines: Vec<RenderedLine>) -> Self {
        Self {
            lines,
            effect: None,
        }
    }

    pub fn effect(effect: Effect) -> Self {
        Self {
            lines: Vec::new(),
            effect: Some(effect),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    // navigation & core
    Help,
    Man,
    Ls,
    Cd,
    Pwd,
    Clear,
    History,
    Whoami,
    Uptime,
    Exit,
    Date,
    // file ops
    Cat,
    Nano,
    Touch,
    Rm,
    Mkdir,
    Cp,
    Mv,
    Head,
    Tail,
    Wc,
    Du,
    Chmod,
    Grep,
    Stat,
    Find,
    // system & network
    Status,
    Sysinfo,
    Ps,
    Top,
    Kill,
    Ping,
    Curl,
    Wget,
    Ip,
    Ifconfig,
    Netstat,
    Uname,
    Hostname,
    Id,
    Df,
    // misc & fun
    Matrix,
    Hack,
    Cowsay,
    Fortune,
    Banner,
    Echo,
    Cal,
    Bc,
    Theme,
    Sudo,
}

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    pub command: CommandName,
}

macro_rules! spec {
    ($name:literal, $usage:literal, $summary:literal, $cmd:ident) => {
        CommandSpec {
            name: $name,
            usage: $usage,
            summary: $summary,
            command: CommandName::$cmd,
        }
    };
}

pub const COMMANDS: &[CommandSpec] = &[
    spec!("help", "help", "list available commands", Help),
    spec!("man", "man", "point at the engine manual", Man),
    spec!("ls", "ls", "list remote files", Ls),
    spec!("cd", "cd [dir]", "change working directory", Cd),
    spec!("pwd", "pwd", "print working directory", Pwd),
    spec!("clear", "clear", "clear the output log", Clear),
    spec!("history", "history", "show command history", History),
    spec!("whoami", "whoami", "print current user", Whoami),
    spec!("uptime", "uptime", "session uptime", Uptime),
    spec!("exit", "exit", "leave the terminal", Exit),
    spec!("date", "date", "current date and time", Date),
    spec!("cat", "cat <file>", "print a remote file", Cat),
    spec!("nano", "nano <file>", "edit a remote file", Nano),
    spec!("touch", "touch <file>", "create an empty remote file", Touch),
    spec!("rm", "rm <file>", "delete a remote file", Rm),
    spec!("mkdir", "mkdir <dir>", "create a remote directory", Mkdir),
    spec!("cp", "cp <src> <dst>", "copy a remote file", Cp),
    spec!("mv", "mv <src> <dst>", "move a remote file", Mv),
    spec!("head", "head <file>", "first lines (simulated)", Head),
    spec!("tail", "tail <file>", "last lines (simulated)", Tail),
    spec!("wc", "wc <file>", "word count (simulated)", Wc),
    spec!("du", "du [path]", "disk usage (simulated)", Du),
    spec!("chmod", "chmod <mode> <file>", "change mode (simulated)", Chmod),
    spec!("grep", "grep <pattern>", "search (simulated)", Grep),
    spec!("stat", "stat <file>", "file status (simulated)", Stat),
    spec!("find", "find [path]", "find files (simulated)", Find),
    spec!("status", "status", "probe the engine", Status),
    spec!("sysinfo", "sysinfo", "system summary (simulated)", Sysinfo),
    spec!("ps", "ps", "process list (simulated)", Ps),
    spec!("top", "top", "resource usage (simulated)", Top),
    spec!("kill", "kill <pid>", "signal a process (simulated)", Kill),
    spec!("ping", "ping <host>", "ping a host (simulated)", Ping),
    spec!("curl", "curl <message>", "round-trip through the engine echo", Curl),
    spec!("wget", "wget <message>", "alias of curl", Wget),
    spec!("ip", "ip", "show address (simulated)", Ip),
    spec!("ifconfig", "ifconfig", "show interfaces (simulated)", Ifconfig),
    spec!("netstat", "netstat", "show sockets (simulated)", Netstat),
    spec!("uname", "uname", "kernel name", Uname),
    spec!("hostname", "hostname", "host name", Hostname),
    spec!("id", "id", "identity", Id),
    spec!("df", "df", "filesystem usage (simulated)", Df),
    spec!("matrix", "matrix", "toggle the rain", Matrix),
    spec!("hack", "hack", "breach the mainframe", Hack),
    spec!("cowsay", "cowsay <text>", "a cow says it", Cowsay),
    spec!("fortune", "fortune", "a fortune", Fortune),
    spec!("banner", "banner <text>", "banner text", Banner),
    spec!("echo", "echo <text>", "print arguments", Echo),
    spec!("cal", "cal", "calendar", Cal),
    spec!("bc", "bc <expression>", "arithmetic", Bc),
    spec!("theme", "theme <default|red|blue>", "switch theme", Theme),
    spec!("sudo", "sudo <cmd>", "you are already root", Sudo),
];

/// Case-insensitive lookup into the command table.
pub fn resolve(name: &str) -> Option<CommandName> {
    let lowered = name.to_ascii_lowercase();
    COMMANDS
        .iter()
        .find(|spec| spec.name == lowered)
        .map(|spec| spec.command)
}

/// Whitespace tokenization, empty tokens discarded.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(|t| t.to_string()).collect()
}

fn rest(args: &[String]) -> String {
    args[1..].join(" ")
}

pub async fn dispatch(
    line: &str,
    session: &mut SessionState,
    store: &dyn FileStore,
) -> DispatchOutcome {
    let args = tokenize(line);
    let Some(first) = args.first() else {
        return DispatchOutcome::empty();
    };
    let name = first.to_ascii_lowercase();
    let Some(command) = resolve(&name) else {
        return DispatchOutcome::line(RenderedLine::error(format!(
            "{SHELL_NAME}: command not found: {name}"
        )));
    };

    match command {
        CommandName::Help => local::help(),
        CommandName::Man => local::man(),
        CommandName::Pwd => local::pwd(session),
        CommandName::Clear => DispatchOutcome::effect(Effect::ClearScreen),
        CommandName::History => local::history(session),
        CommandName::Whoami => local::whoami(session),
        CommandName::Uptime => local::uptime(session),
        CommandName::Exit => DispatchOutcome::effect(Effect::Exit),
        CommandName::Date => local::date(),
        CommandName::Echo => DispatchOutcome::line(RenderedLine::out(rest(&args))),
        CommandName::Banner => local::banner(&rest(&args)),
        CommandName::Cowsay => local::cowsay(&rest(&args)),
        CommandName::Fortune => local::fortune(),
        CommandName::Cal => local::cal(),
        CommandName::Theme => local::theme(session, args.get(1).map(String::as_str)),
        CommandName::Sudo => local::sudo(),
        CommandName::Uname => local::uname(),
        CommandName::Hostname => local::hostname(session),
        CommandName::Id => local::id(session),

        CommandName::Cd => {
            session.change_dir(args.get(1).map(String::as_str));
            DispatchOutcome::empty()
        }

        CommandName::Ls => files::ls(store).await,
        CommandName::Cat => files::cat(store, args.get(1)).await,
        CommandName::Nano => files::nano(store, args.get(1)).await,
        CommandName::Touch => files::touch(store, args.get(1)).await,
        CommandName::Rm => files::rm(store, args.get(1)).await,
        CommandName::Mkdir => files::mkdir(store, args.get(1)).await,
        CommandName::Cp => files::copy(store, &args, false).await,
        CommandName::Mv => files::copy(store, &args, true).await,
        CommandName::Head => files::head(),
        CommandName::Tail => files::tail(),
        CommandName::Wc => files::wc(args.get(1)),
        CommandName::Du => files::du(args.get(1)),
        CommandName::Chmod => files::chmod(),
        CommandName::Grep => files::grep(),
        CommandName::Stat => files::stat(),
        CommandName::Find => files::find(),

        CommandName::Status => system::status(store).await,
        CommandName::Curl | CommandName::Wget => system::curl(store, &args).await,
        CommandName::Sysinfo => system::sysinfo(),
        CommandName::Ps => system::ps(),
        CommandName::Top => system::top(),
        CommandName::Kill => system::kill(args.get(1)),
        CommandName::Ping => system::ping(args.get(1)),
        CommandName::Ip => system::ip(),
        CommandName::Ifconfig => system::ifconfig(),
        CommandName::Netstat => system::netstat(),
        CommandName::Df => system::df(),
        CommandName::Matrix => DispatchOutcome::effect(Effect::ToggleMatrix),
        CommandName::Hack => system::hack(),

        CommandName::Bc => match calc::evaluate(&rest(&args)) {
            Ok(value) => DispatchOutcome::line(RenderedLine::out(format!(
                "Result: {}",
                calc::format_result(value)
            ))),
            Err(msg) => DispatchOutcome::line(RenderedLine::error(format!("bc: {msg}"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{dispatch, resolve, tokenize, CommandName, DispatchOutcome, Effect};
    use crate::remote::MockFileStore;
    use crate::render::{LineKind, RenderedLine};
    use crate::session::SessionState;

    #[test]
    fn tokenize_discards_empty_tokens() {
        assert_eq!(tokenize("  ls   -l  "), vec!["ls", "-l"]);
        assert!(tokenize("   \t ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn resolve_is_case_insensitive() {
        assert_eq!(resolve("LS"), Some(CommandName::Ls));
        assert_eq!(resolve("Echo"), Some(CommandName::Echo));
        assert_eq!(resolve("foobar"), None);
    }

    #[tokio::test]
    async fn whitespace_only_input_runs_no_handler() {
        let store = MockFileStore::new();
        let mut session = SessionState::default();
        let outcome = dispatch("   \t  ", &mut session, &store).await;
        assert_eq!(outcome, DispatchOutcome::empty());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_command_renders_not_found_and_mutates_nothing() {
        let store = MockFileStore::new();
        let mut session = SessionState::default();
        let outcome = dispatch("foobar", &mut session, &store).await;
        assert_eq!(outcome.lines.len(), 1);
        assert_eq!(outcome.lines[0].kind, LineKind::Error);
        assert!(outcome.lines[0].text.contains("command not found"));
        assert!(outcome.lines[0].text.contains("foobar"));
        assert!(outcome.effect.is_none());
        assert_eq!(session.cwd, "/");
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn echo_joins_arguments() {
        let store = MockFileStore::new();
        let mut session = SessionState::default();
        let outcome = dispatch("echo hello world", &mut session, &store).await;
        assert_eq!(outcome.lines, vec![RenderedLine::out("hello world")]);
    }

    #[tokio::test]
    async fn cd_updates_session_and_renders_nothing() {
        let store = MockFileStore::new();
        let mut session = SessionState::default();
        let outcome = dispatch("cd projects", &mut session, &store).await;
        assert!(outcome.lines.is_empty());
        assert_eq!(session.cwd, "/projects");
        assert_eq!(session.prompt(), "root@expresso:/projects$ ");
    }

    #[tokio::test]
    async fn clear_and_exit_are_effects() {
        let store = MockFileStore::new();
        let mut session = SessionState::default();
        let outcome = dispatch("clear", &mut session, &store).await;
        assert_eq!(outcome.effect, Some(Effect::ClearScreen));
        let outcome = dispatch("EXIT", &mut session, &store).await;
        assert_eq!(outcome.effect, Some(Effect::Exit));
    }

    #[tokio::test]
    async fn bc_reports_malformed_expressions() {
        let store = MockFileStore::new();
        let mut session = SessionState::default();
        let outcome = dispatch("bc 2+3*4", &mut session, &store).await;
        assert_eq!(outcome.lines, vec![RenderedLine::out("Result: 14")]);
        let outcome = dispatch("bc 1/0", &mut session, &store).await;
        assert_eq!(outcome.lines[0].kind, LineKind::Error);
        let outcome = dispatch("bc )(", &mut session, &store).await;
        assert_eq!(outcome.lines[0].kind, LineKind::Error);
    }
}
