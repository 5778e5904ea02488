//! Integration tests for ticket-store

/// Ticket blob laid out like the handshake layer produces them
fn make_ticket(issued_at: u64, ttl: u32, len: usize) -> Vec<u8> {
    let mut buf = vec![0xcc; len];
    buf[..8].copy_from_slice(&issued_at.to_be_bytes());
    buf[8..11].copy_from_slice(&[0, 1, 0]);
    buf[11..13].copy_from_slice(&((len - 31) as u16).to_be_bytes());
    buf[13..17].copy_from_slice(&ttl.to_be_bytes());
    buf[len - 18] = 0;
    buf[len - 17] = 16;
    buf
}

mod store_tests {
    use super::make_ticket;
    use tempfile::TempDir;
    use ticket_store::{TicketRecord, TicketStore, TicketStoreError};

    const SNI: [&str; 3] = ["example.com", "example.net", "test.example.com"];
    const ALPN: [&str; 3] = ["hq05", "hq07", "hq09"];

    const TICKET_TIME: u64 = 40_000_000_000;
    const CURRENT_TIME: u64 = 50_000_000_000;
    const RETRIEVE_TIME: u64 = 60_000_000_000;
    const TOO_LATE_TIME: u64 = 150_000_000_000;
    const TTL: u32 = 100_000;

    fn expected_len(i: usize, j: usize) -> usize {
        64 + j * SNI.len() + i
    }

    fn filled_store() -> TicketStore {
        let mut store = TicketStore::new();
        for (i, sni) in SNI.iter().enumerate() {
            for (j, alpn) in ALPN.iter().enumerate() {
                let issued = TICKET_TIME / 1000 + 1000 * (i * ALPN.len() + j) as u64;
                let ticket = make_ticket(issued, TTL, expected_len(i, j));
                store
                    .store(CURRENT_TIME, sni.as_bytes(), alpn.as_bytes(), &ticket)
                    .unwrap();
            }
        }
        store
    }

    fn records(store: &TicketStore) -> Vec<TicketRecord> {
        store.iter().cloned().collect()
    }

    #[test]
    fn store_lookup_save_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ticket_store_test.bin");
        let mut store = filled_store();
        assert_eq!(store.len(), 9);

        for (i, sni) in SNI.iter().enumerate() {
            for (j, alpn) in ALPN.iter().enumerate() {
                let ticket = store
                    .lookup(CURRENT_TIME, sni.as_bytes(), alpn.as_bytes())
                    .unwrap();
                assert_eq!(ticket.len(), expected_len(i, j));
            }
        }

        store.save(CURRENT_TIME, &path).unwrap();

        let reloaded = TicketStore::load(&path, RETRIEVE_TIME).unwrap();
        assert_eq!(records(&reloaded), records(&store));

        let too_late = TicketStore::load(&path, TOO_LATE_TIME).unwrap();
        assert!(too_late.is_empty());

        store.free();
        assert!(store.is_empty());
    }

    #[test]
    fn expiry_boundary() {
        let store = filled_store();
        let expires_at = CURRENT_TIME + 100_000_000_000;
        assert!(store.iter().all(|r| r.expires_at() == expires_at));

        assert!(store
            .lookup(10_000_000_000 + CURRENT_TIME, b"example.com", b"hq05")
            .is_some());
        assert!(store
            .lookup(expires_at - 1, b"example.com", b"hq05")
            .is_some());
        assert!(store.lookup(expires_at, b"example.com", b"hq05").is_none());
    }

    #[test]
    fn short_ticket_rejected() {
        let mut store = filled_store();
        let err = store
            .store(CURRENT_TIME, b"short.example", b"h3", &[0u8; 34])
            .unwrap_err();

        assert!(matches!(err, TicketStoreError::MalformedTicket { .. }));
        assert_eq!(store.len(), 9);
    }

    #[test]
    fn truncated_file_fails_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tickets.bin");
        let bytes = filled_store().encode();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        assert!(matches!(
            TicketStore::load(&path, RETRIEVE_TIME),
            Err(TicketStoreError::TruncatedRecord { .. })
        ));
    }
}

mod cli_tests {
    use super::make_ticket;
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct Env {
        temp: TempDir,
    }

    impl Env {
        fn new() -> Self {
            Self {
                temp: TempDir::new().unwrap(),
            }
        }

        fn ticket_file(&self) -> PathBuf {
            self.temp.path().join("tickets.bin")
        }

        fn blob(&self, name: &str, ttl: u32, len: usize) -> PathBuf {
            let path = self.temp.path().join(name);
            std::fs::write(&path, make_ticket(1, ttl, len)).unwrap();
            path
        }

        fn cmd(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("ticket-store");
            cmd.env_remove("TICKET_STORE_FILE")
                .env_remove("TICKET_STORE_CONFIG")
                .arg("--config")
                .arg(self.temp.path().join("config.toml"))
                .arg("--file")
                .arg(self.ticket_file());
            cmd
        }

        fn import(&self, sni: &str, alpn: &str, blob: &Path) {
            self.cmd()
                .args(["import", "--sni", sni, "--alpn", alpn])
                .arg(blob)
                .assert()
                .success()
                .stdout(predicate::str::contains("Stored ticket"));
        }
    }

    #[test]
    fn help_displays() {
        Env::new()
            .cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("session ticket cache"));
    }

    #[test]
    fn version_displays() {
        Env::new()
            .cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("ticket-store"));
    }

    #[test]
    fn list_empty() {
        Env::new()
            .cmd()
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No stored tickets"));
    }

    #[test]
    fn list_empty_json() {
        Env::new()
            .cmd()
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn import_then_lookup() {
        let env = Env::new();
        let blob = env.blob("ticket.raw", 3600, 64);
        env.import("example.com", "h3", &blob);

        env.cmd()
            .args(["lookup", "--sni", "example.com", "--alpn", "h3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("64 bytes"));

        env.cmd()
            .args(["lookup", "--sni", "example.com", "--alpn", "h3", "--hex"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cccccc"));

        env.cmd()
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("example.com h3"));
    }

    #[test]
    fn lookup_missing_key() {
        let env = Env::new();
        let blob = env.blob("ticket.raw", 3600, 64);
        env.import("example.com", "h3", &blob);

        env.cmd()
            .args(["lookup", "--sni", "example.com", "--alpn", "h2"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No ticket found"));
    }

    #[test]
    fn import_short_blob_fails() {
        let env = Env::new();
        let blob = env.temp.path().join("short.raw");
        std::fs::write(&blob, [0u8; 20]).unwrap();

        env.cmd()
            .args(["import", "--sni", "example.com", "--alpn", "h3"])
            .arg(&blob)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Malformed ticket"));

        assert!(!env.ticket_file().exists());
    }

    #[test]
    fn expired_ticket_hidden_and_pruned() {
        let env = Env::new();
        env.import("live.example", "h3", &env.blob("live.raw", 3600, 48));
        env.import("dead.example", "h3", &env.blob("dead.raw", 0, 48));

        env.cmd()
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("live.example")
                    .and(predicate::str::contains("dead.example").not()),
            );

        env.cmd()
            .args(["list", "--all", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("dead.example"));

        env.cmd()
            .arg("prune")
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed 1 expired ticket(s), 1 remaining"));

        env.cmd()
            .args(["list", "--all", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("dead.example").not());
    }

    #[test]
    fn prune_missing_file() {
        Env::new()
            .cmd()
            .arg("prune")
            .assert()
            .success()
            .stdout(predicate::str::contains("No ticket file"));
    }

    #[test]
    fn corrupt_file_reports_hint() {
        let env = Env::new();
        std::fs::write(env.ticket_file(), [0u8; 5]).unwrap();

        env.cmd()
            .arg("list")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Truncated ticket record"));
    }

    #[test]
    fn config_path() {
        Env::new()
            .cmd()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        Env::new()
            .cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[store]"));
    }

    #[test]
    fn config_init_writes_defaults() {
        let env = Env::new();
        let config = env.temp.path().join("config.toml");

        env.cmd()
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));
        let written = std::fs::read_to_string(&config).unwrap();
        assert!(written.contains("[store]"));

        std::fs::write(&config, "[general]\nlog_format = \"json\"\n").unwrap();
        env.cmd()
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
        assert!(std::fs::read_to_string(&config).unwrap().contains("json"));

        env.cmd()
            .args(["config", "init", "--force"])
            .assert()
            .success();
        assert!(std::fs::read_to_string(&config).unwrap().contains("[store]"));
    }

    #[test]
    fn list_all_shows_ticket_expiring_at_zero() {
        let env = Env::new();
        let mut store = ticket_store::TicketStore::new();
        store
            .store(0, b"epoch.example", b"h3", &make_ticket(0, 0, 48))
            .unwrap();
        store.save(0, &env.ticket_file()).unwrap();

        env.cmd()
            .args(["list", "--all", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("epoch.example"));

        env.cmd()
            .arg("prune")
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed 1 expired ticket(s), 0 remaining"));
    }
}
