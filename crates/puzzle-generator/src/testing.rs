//! Scripted UCI engines for session tests.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

/// Write a shell script that speaks just enough UCI: it answers every `go`
/// with `go_reply`, and exits without a reply once `max_searches` searches
/// have been served.
pub fn fake_engine(name: &str, go_reply: &str, max_searches: Option<usize>) -> PathBuf {
    let path = std::env::temp_dir().join(format!("fake-uci-{name}-{}", std::process::id()));
    let limit = match max_searches {
        Some(n) => format!("n=$((n+1)); if [ \"$n\" -gt {n} ]; then exit 0; fi; "),
        None => String::new(),
    };
    let script = format!(
        "#!/bin/sh\nn=0\nwhile read -r cmd; do\n  case \"$cmd\" in\n    uci) echo 'id name fake'; echo uciok ;;\n    isready) echo readyok ;;\n    go*) {limit}printf '{go_reply}' ;;\n    quit) exit 0 ;;\n  esac\ndone\n"
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
