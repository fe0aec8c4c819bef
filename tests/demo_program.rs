//! Snapshots of the CLI's built-in demo program

use std::process::Command;

fn run_demo(extra_args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_str-templates"))
        .arg("--demo")
        .args(extra_args)
        .output()
        .expect("Should run the CLI");
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Output should be UTF-8")
}

#[test]
fn test_demo_composed() {
    insta::assert_snapshot!(run_demo(&["--no-format"]), @r#"
    //Copyright(2020) DFG
    //ss
    
    int main(void)
    {
        int x = f("hello");
        for (int i = 0; i<x; i++)
        {
            if (i == 0)
            {
                f2(1+1);
            }
        }
    }
    "#);
}

#[test]
fn test_demo_formatted() {
    insta::assert_snapshot!(run_demo(&[]), @r#"
    //Copyright(2020) DFG
    //ss
    
    int main(void) {
            int x = f("hello");
            for (int i = 0; i<x; i++) {
                    if (i == 0) {
                            f2(1+1);
                    }
            }
    }
    "#);
}

#[test]
fn test_demo_formatted_exact() {
    assert_eq!(
        run_demo(&[]),
        concat!(
            "//Copyright(2020) DFG\n",
            "//ss\n",
            "\n",
            "int main(void) {\n",
            "        int x = f(\"hello\");\n",
            "        for (int i = 0; i<x; i++) {\n",
            "                if (i == 0) {\n",
            "                        f2(1+1);\n",
            "                }\n",
            "        }\n",
            "}\n",
        )
    );
}

#[test]
fn test_demo_strict_passes() {
    assert_eq!(run_demo(&["--strict"]), run_demo(&[]));
}
