use pdf_manual_split::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../pdf-split.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.output.default_folder, "_splitted");
    assert_eq!(cfg.output.manifest_suffix, "_split_summary.json");
    assert_eq!(cfg.limits.min_pages_to_split, 2);
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: Config = toml::from_str("[logging]\nlevel = \"debug\"\njson = true\nwrite_to_file = false\nfile_path = \"\"\n")
        .expect("parse TOML");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.output.write_manifest);
    assert!(cfg.security.reject_url_inputs);
}
