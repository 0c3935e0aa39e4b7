use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_seed-of-life")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "seed-of-life.exe"
            } else {
                "seed-of-life"
            });
            p
        })
}

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_frame_writes_png() {
    let dir = scratch("frame");
    let config_path = dir.join("config.json");
    let out_path = dir.join("out.png");

    let config = serde_json::json!({
        "radius_ratio": 0.2,
        "colors": { "background": "#102030", "circle-1": "rgb(255, 0, 0)" },
        "layers": { "tri_petals": true }
    });
    std::fs::write(&config_path, serde_json::to_vec_pretty(&config).unwrap()).unwrap();

    let status = std::process::Command::new(exe())
        .args(["frame", "--width", "96", "--height", "64", "--rotation", "0.5", "--config"])
        .arg(&config_path)
        .arg("--out")
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (96, 64));
    assert_eq!(img.get_pixel(0, 0).0, [0x10, 0x20, 0x30, 255]);
}

#[test]
fn cli_animate_writes_sequence() {
    let dir = scratch("animate");

    let status = std::process::Command::new(exe())
        .args(["animate", "--width", "48", "--height", "48", "--frames", "4", "--every", "2"])
        .arg("--out-dir")
        .arg(&dir)
        .status()
        .unwrap();

    assert!(status.success());
    assert!(dir.join("frame_00000.png").exists());
    assert!(dir.join("frame_00002.png").exists());
    assert!(!dir.join("frame_00001.png").exists());
}

#[test]
fn cli_config_prints_defaults() {
    let out = std::process::Command::new(exe())
        .arg("config")
        .output()
        .unwrap();
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["radius_ratio"], serde_json::json!(0.16));
    assert_eq!(v["inner_wedge_count"], serde_json::json!(6));
}

#[test]
fn cli_rejects_invalid_config() {
    let dir = scratch("invalid");
    let config_path = dir.join("config.json");
    std::fs::write(&config_path, r#"{ "inner_wedge_count": 3 }"#).unwrap();

    let status = std::process::Command::new(exe())
        .arg("config")
        .arg("--config")
        .arg(&config_path)
        .status()
        .unwrap();
    assert!(!status.success());
}
