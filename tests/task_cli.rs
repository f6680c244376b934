use predicates::str::contains;

mod support;

use support::{listed_ids, parse_json, TestEnv};

const SEEDED_BLOB: &str = r#"[
  {"id":1,"title":"Buy milk","description":"weekly groceries","dueDate":"2099-03-01","completed":false},
  {"id":2,"title":"File taxes","description":"before the deadline","dueDate":"2099-01-15","completed":true},
  {"id":3,"title":"buy stamps","description":"post office","dueDate":"2099-03-01","completed":false}
]"#;

fn add_task(env: &TestEnv, title: &str) -> u64 {
    let output = env
        .cmd()
        .args(["add", title, "--due", "2099-01-01", "--json"])
        .output()
        .expect("run add");
    assert!(output.status.success());
    parse_json(&output.stdout)["data"]["id"]
        .as_u64()
        .expect("id")
}

#[test]
fn add_persists_and_list_shows_the_task() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "Pay bills", "--due", "2099-01-01"])
        .assert()
        .success()
        .stdout(contains("Task created"));

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Pay bills"))
        .stdout(contains("1 task"));

    let blob = env.read_blob();
    let tasks = blob.as_array().expect("array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Pay bills");
    assert_eq!(tasks[0]["completed"], false);
    assert_eq!(tasks[0]["dueDate"], "2099-01-01");
}

#[test]
fn add_rejects_empty_title_and_store_stays_unchanged() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "", "--description", "x", "--due", "2099-01-01"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("title"));

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("0 tasks"));
}

#[test]
fn add_rejects_past_due_date() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "Too late", "--due", "2000-01-01"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("due date"));
}

#[test]
fn add_rejects_unparseable_due_date() {
    let env = TestEnv::new();

    env.cmd()
        .args(["add", "Sometime", "--due", "next tuesday"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("expected YYYY-MM-DD"));
}

#[test]
fn done_toggles_and_toggles_back() {
    let env = TestEnv::new();
    let id = add_task(&env, "Flip me");
    let id_arg = id.to_string();

    let output = env
        .cmd()
        .args(["done", id_arg.as_str(), "--json"])
        .output()
        .expect("run done");
    assert!(output.status.success());
    assert_eq!(parse_json(&output.stdout)["data"]["completed"], true);

    let output = env
        .cmd()
        .args(["done", id_arg.as_str(), "--json"])
        .output()
        .expect("run done");
    assert_eq!(parse_json(&output.stdout)["data"]["completed"], false);
}

#[test]
fn done_on_unknown_id_fails_with_user_error() {
    let env = TestEnv::new();

    env.cmd()
        .args(["done", "424242"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("No task with id 424242"));
}

#[test]
fn edit_updates_in_place_preserving_id_and_completed() {
    let env = TestEnv::new();
    let id = add_task(&env, "Old title");
    let id_arg = id.to_string();
    env.cmd()
        .args(["done", id_arg.as_str()])
        .assert()
        .success();

    let output = env
        .cmd()
        .args([
            "edit",
            id_arg.as_str(),
            "--title",
            "New title",
            "--due",
            "2099-06-01",
            "--json",
        ])
        .output()
        .expect("run edit");
    assert!(output.status.success());

    let data = &parse_json(&output.stdout)["data"];
    assert_eq!(data["id"].as_u64(), Some(id));
    assert_eq!(data["title"], "New title");
    assert_eq!(data["dueDate"], "2099-06-01");
    assert_eq!(data["completed"], true);
}

#[test]
fn edit_rejects_merged_result_that_fails_validation() {
    let env = TestEnv::new();
    let id = add_task(&env, "Keep me valid");
    let id_arg = id.to_string();

    env.cmd()
        .args(["edit", id_arg.as_str(), "--title", ""])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("title"));

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Keep me valid"));
}

#[test]
fn rm_with_yes_deletes_and_reports() {
    let env = TestEnv::new();
    let id = add_task(&env, "Doomed");
    let id_arg = id.to_string();

    let output = env
        .cmd()
        .args(["rm", id_arg.as_str(), "--yes", "--json"])
        .output()
        .expect("run rm");
    assert!(output.status.success());
    assert_eq!(parse_json(&output.stdout)["data"]["removed"], true);

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("0 tasks"));
}

#[test]
fn rm_unknown_id_reports_false_without_failing() {
    let env = TestEnv::new();
    add_task(&env, "Survivor");

    let output = env
        .cmd()
        .args(["rm", "999", "--yes", "--json"])
        .output()
        .expect("run rm");
    assert!(output.status.success());
    assert_eq!(parse_json(&output.stdout)["data"]["removed"], false);

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("1 task"));
}

#[test]
fn rm_prompt_declined_keeps_the_task() {
    let env = TestEnv::new();
    let id = add_task(&env, "Spared");
    let id_arg = id.to_string();

    let output = env
        .cmd()
        .args(["rm", id_arg.as_str(), "--json"])
        .write_stdin("n\n")
        .output()
        .expect("run rm");
    assert!(output.status.success());
    assert_eq!(parse_json(&output.stdout)["data"]["removed"], false);

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Spared"));
}

#[test]
fn rm_prompt_accepted_deletes_the_task() {
    let env = TestEnv::new();
    let id = add_task(&env, "Going");
    let id_arg = id.to_string();

    let output = env
        .cmd()
        .args(["rm", id_arg.as_str(), "--json"])
        .write_stdin("y\n")
        .output()
        .expect("run rm");
    assert!(output.status.success());
    assert_eq!(parse_json(&output.stdout)["data"]["removed"], true);
}

#[test]
fn list_filters_searches_and_sorts_compose() {
    let env = TestEnv::new();
    env.seed_blob(SEEDED_BLOB);

    let output = env
        .cmd()
        .args(["list", "--status", "incomplete", "--json"])
        .output()
        .expect("run list");
    assert_eq!(listed_ids(&parse_json(&output.stdout)), vec![1, 3]);

    let output = env
        .cmd()
        .args(["list", "--search", "BUY", "--json"])
        .output()
        .expect("run list");
    assert_eq!(listed_ids(&parse_json(&output.stdout)), vec![1, 3]);

    let output = env
        .cmd()
        .args(["list", "--sort", "due-date", "--order", "desc", "--json"])
        .output()
        .expect("run list");
    // ids 1 and 3 tie on due date and keep their original order.
    assert_eq!(listed_ids(&parse_json(&output.stdout)), vec![1, 3, 2]);

    let output = env
        .cmd()
        .args([
            "list",
            "--status",
            "incomplete",
            "--search",
            "buy",
            "--sort",
            "title",
            "--json",
        ])
        .output()
        .expect("run list");
    assert_eq!(listed_ids(&parse_json(&output.stdout)), vec![1, 3]);
}

#[test]
fn list_rejects_unknown_selector_spellings() {
    let env = TestEnv::new();

    env.cmd()
        .args(["list", "--status", "finished"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown status filter"));

    env.cmd()
        .args(["list", "--sort", "priority"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown sort column"));
}

#[test]
fn list_survives_a_corrupt_blob() {
    let env = TestEnv::new();
    env.seed_blob("{definitely not json");

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("0 tasks"));
}

#[test]
fn legacy_desc_blobs_still_load_and_search() {
    let env = TestEnv::new();
    env.seed_blob(r#"[{"id":7,"title":"Old","desc":"from a legacy blob","dueDate":"2099-01-01"}]"#);

    env.cmd()
        .args(["list", "--search", "legacy"])
        .assert()
        .success()
        .stdout(contains("Old"));
}

#[test]
fn json_envelope_carries_schema_and_command() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args(["list", "--json"])
        .output()
        .expect("run list");
    let envelope = parse_json(&output.stdout);
    assert_eq!(envelope["schema_version"], "tsk.v1");
    assert_eq!(envelope["command"], "list");
    assert_eq!(envelope["status"], "success");
}

#[test]
fn json_validation_error_names_the_fields() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args(["add", "", "--due", "2099-01-01", "--json"])
        .output()
        .expect("run add");
    assert_eq!(output.status.code(), Some(2));

    let envelope = parse_json(&output.stdout);
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["error"]["kind"], "user_error");
    assert_eq!(envelope["error"]["details"]["issues"][0]["field"], "title");
}

#[test]
fn quiet_suppresses_human_output() {
    let env = TestEnv::new();

    let output = env
        .cmd()
        .args(["add", "Silent", "--due", "2099-01-01", "--quiet"])
        .output()
        .expect("run add");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn require_description_config_is_enforced() {
    let env = TestEnv::with_config("[tasks]\nrequire_description = true\n");

    env.cmd()
        .args(["add", "No description", "--due", "2099-01-01"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("description"));

    env.cmd()
        .args([
            "add",
            "Described",
            "--description",
            "fully",
            "--due",
            "2099-01-01",
        ])
        .assert()
        .success();
}
