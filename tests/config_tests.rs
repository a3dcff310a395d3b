use reception_tv::config::{Configuration, PLAYLIST_FILE_ENV, SOURCE_DIRECTORIES_ENV};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }
}

#[test]
fn empty_document_uses_defaults() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    assert_eq!(
        cfg.video_source_directories,
        vec![
            PathBuf::from("/mnt"),
            PathBuf::from("/srv/reception-tv/videos")
        ]
    );
    assert_eq!(cfg.playlist_file, PathBuf::from("/tmp/playlist.txt"));
    assert_eq!(cfg.max_entries, 100);
    assert_eq!(cfg.empty_retry_delay, Duration::from_secs(30));
    assert_eq!(
        cfg.player.command,
        vec!["mpv", "--fullscreen", "--no-terminal", "--loop-file=no"]
    );
    assert_eq!(cfg.player.playlist_flag, "--playlist=");
    assert!(cfg.validated().is_ok());
}

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
video-source-directories:
  - /media/usb
  - /srv/shows
playlist-file: /run/reception/playlist.txt
max-entries: 40
empty-retry-delay: 2m 30s
player:
  command: [vlc, --fullscreen]
  playlist-flag: ""
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        cfg.video_source_directories,
        vec![PathBuf::from("/media/usb"), PathBuf::from("/srv/shows")]
    );
    assert_eq!(cfg.playlist_file, PathBuf::from("/run/reception/playlist.txt"));
    assert_eq!(cfg.max_entries, 40);
    assert_eq!(cfg.empty_retry_delay, Duration::from_secs(150));
    assert_eq!(cfg.player.command, vec!["vlc", "--fullscreen"]);
    assert_eq!(cfg.player.playlist_flag, "");
}

#[test]
fn partial_player_section_keeps_other_defaults() {
    let yaml = r#"
player:
  command: [mpv]
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.player.command, vec!["mpv"]);
    assert_eq!(cfg.player.playlist_flag, "--playlist=");
}

#[test]
fn invalid_values_are_rejected() {
    let zero_cap: Configuration = serde_yaml::from_str("max-entries: 0").unwrap();
    assert!(zero_cap.validated().is_err());

    let no_roots: Configuration = serde_yaml::from_str("video-source-directories: []").unwrap();
    assert!(no_roots.validated().is_err());

    let no_delay: Configuration = serde_yaml::from_str("empty-retry-delay: 0s").unwrap();
    assert!(no_delay.validated().is_err());

    let no_player: Configuration = serde_yaml::from_str("player: { command: [] }").unwrap();
    let err = no_player.validated().unwrap_err();
    assert!(err.to_string().contains("player.command"));
}

#[test]
fn unknown_duration_format_fails_to_parse() {
    let res: Result<Configuration, _> = serde_yaml::from_str("empty-retry-delay: soon");
    assert!(res.is_err());
}

#[test]
fn environment_overrides_file_values() {
    let vars = [
        (SOURCE_DIRECTORIES_ENV, "/mnt/a:/mnt/b;/mnt/c,/mnt/d"),
        (PLAYLIST_FILE_ENV, "/var/tmp/list.txt"),
    ];
    let cfg = Configuration::default().with_overrides_from(lookup(&vars));
    assert_eq!(
        cfg.video_source_directories,
        vec![
            PathBuf::from("/mnt/a"),
            PathBuf::from("/mnt/b"),
            PathBuf::from("/mnt/c"),
            PathBuf::from("/mnt/d"),
        ]
    );
    assert_eq!(cfg.playlist_file, PathBuf::from("/var/tmp/list.txt"));
}

#[test]
fn blank_environment_values_are_ignored() {
    let vars = [(SOURCE_DIRECTORIES_ENV, " : ; "), (PLAYLIST_FILE_ENV, "  ")];
    let cfg = Configuration::default().with_overrides_from(lookup(&vars));
    let defaults = Configuration::default();
    assert_eq!(cfg.video_source_directories, defaults.video_source_directories);
    assert_eq!(cfg.playlist_file, defaults.playlist_file);
}

#[test]
fn loads_from_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("config.yaml");
    fs::write(&path, "max-entries: 12\nempty-retry-delay: 5s\n").unwrap();

    let cfg = Configuration::from_yaml_file(&path).unwrap().validated().unwrap();
    assert_eq!(cfg.max_entries, 12);
    assert_eq!(cfg.empty_retry_delay, Duration::from_secs(5));
}

#[test]
fn missing_file_reports_path() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("absent.yaml");
    let err = Configuration::from_yaml_file(&path).unwrap_err();
    assert!(err.to_string().contains("absent.yaml"));
}
