//! System and network commands. `status` and `curl` are lightly proxied
//! through the engine's probe endpoints; the rest render fixed text.

use crate::commands::{DispatchOutcome, Effect};
use crate::remote::FileStore;
use crate::render::RenderedLine;

pub async fn status(store: &dyn FileStore) -> DispatchOutcome {
    match store.identity_probe().await {
        Ok(_) => DispatchOutcome::line(RenderedLine::success(
            "[ONLINE] Hybrid Engine Running. [CPP-LOGIC] ACTIVE. [RUST-KERNEL] ACTIVE.",
        )),
        Err(err) => DispatchOutcome::line(RenderedLine::error(format!(
            "[OFFLINE] engine unreachable: {err}"
        ))),
    }
}

pub async fn curl(store: &dyn FileStore, args: &[String]) -> DispatchOutcome {
    if args.len() < 2 {
        return DispatchOutcome::line(RenderedLine::out("usage: curl <message>"));
    }
    let message = args[1..].join(" ");
    match store.echo_probe(&message).await {
        Ok(body) => {
            let mut text = format!("GET {message}... 200 OK");
            if !body.is_empty() {
                text.push('\n');
                text.push_str(&body);
            }
            DispatchOutcome::line(RenderedLine::out(text))
        }
        Err(err) => DispatchOutcome::line(RenderedLine::error(format!("curl: {err}"))),
    }
}

pub fn sysinfo() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(
        "CPU: Expresso Quad-Core\nRAM: 16GB\nKernel: Rust 1.75",
    ))
}

pub fn ps() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(
        "PID TTY TIME CMD\n1 ? 00:00:01 expresso-rs",
    ))
}

pub fn top() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(
        "Mem: 16G total, 4G free\nCPU: 5% user, 1% sys",
    ))
}

pub fn kill(pid: Option<&String>) -> DispatchOutcome {
    let Some(pid) = pid else {
        return DispatchOutcome::line(RenderedLine::out("usage: kill <pid>"));
    };
    DispatchOutcome::line(RenderedLine::out(format!("Signal sent to {pid}")))
}

pub fn ping(host: Option<&String>) -> DispatchOutcome {
    let host = host.map(String::as_str).unwrap_or("localhost");
    DispatchOutcome::line(RenderedLine::out(format!(
        "PING {host}: 64 bytes, time=30ms"
    )))
}

pub fn ip() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out("172.17.0.2"))
}

pub fn ifconfig() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out("eth0: inet 172.17.0.2"))
}

pub fn netstat() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(
        "Proto Recv-Q Send-Q Local Address Foreign Address State",
    ))
}

pub fn df() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out(
        "Filesystem Size Used Avail Use% Mounted on\n/dev/sda1 100G 20G 80G 20% /",
    ))
}

pub fn hack() -> DispatchOutcome {
    DispatchOutcome::line(RenderedLine::out("Breaching...")).with_effect(Effect::Staged {
        delay_ms: 1000,
        line: RenderedLine::success("Mainframe accessed."),
    })
}

#[cfg(test)]
mod tests {
    use super::{curl, hack, status};
    use crate::commands::Effect;
    use crate::remote::MockFileStore;
    use crate::render::LineKind;

    #[tokio::test]
    async fn status_reports_online_via_identity_probe() {
        let store = MockFileStore::new();
        let outcome = status(&store).await;
        assert_eq!(outcome.lines[0].kind, LineKind::Success);
        assert_eq!(store.calls(), vec!["user-agent"]);
    }

    #[tokio::test]
    async fn curl_round_trips_through_echo() {
        let store = MockFileStore::new();
        let args: Vec<String> = ["curl", "hello", "engine"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let outcome = curl(&store, &args).await;
        assert!(outcome.lines[0].text.starts_with("GET hello engine... 200 OK"));
        assert!(outcome.lines[0].text.contains("hello engine"));
        assert_eq!(store.calls(), vec!["echo hello engine"]);
    }

    #[test]
    fn hack_stages_its_second_line() {
        let outcome = hack();
        assert_eq!(outcome.lines[0].text, "Breaching...");
        match outcome.effect {
            Some(Effect::Staged { delay_ms, ref line }) => {
                assert_eq!(delay_ms, 1000);
                assert_eq!(line.text, "Mainframe accessed.");
            }
            other => panic!("expected staged effect, got {other:?}"),
        }
    }
}
