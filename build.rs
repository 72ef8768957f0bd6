fn main() {
    // コミット・チェックアウトでバージョン文字列を更新する
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let output = std::process::Command::new("git")
        .args(["describe", "--always", "--dirty", "--tags"])
        .output();

    let version = match output {
        Ok(o) if o.status.success() => String::from_utf8_lossy(&o.stdout).trim().to_string(),
        _ => "unversioned".to_string(),
    };

    println!("cargo:rustc-env=GIT_VERSION={}", version);
}
