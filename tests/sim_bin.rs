use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "--width", "4", "--height", "3", "--rounds", "5"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    let total = v["x_wins"].as_u64().unwrap() + v["o_wins"].as_u64().unwrap() + v["draws"].as_u64().unwrap();
    assert_eq!(total, 5);
    assert!(v["user_moves"].as_u64().unwrap() >= 5);
}
