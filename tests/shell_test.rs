/*!
 * Shell Tests
 * Command scripts read from files, as the kernel binary does
 */

use pretty_assertions::assert_eq;
use resman_kernel::{Kernel, Shell};
use std::fs::File;
use std::io::{BufReader, Write};
use tempfile::NamedTempFile;

fn run_script(script: &str) -> String {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(script.as_bytes()).unwrap();
    file.flush().unwrap();

    let input = BufReader::new(File::open(file.path()).unwrap());
    let mut shell = Shell::new(Kernel::default(), Vec::new());
    shell.run(input).unwrap();

    let (_, out) = shell.into_parts();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_script_from_file() {
    let output = run_script(
        "in\n\
         cr 1\n\
         cr 1\n\
         rq 0 1\n\
         to\n\
         rq 0 1\n\
         rl 0 1\n\
         de 1\n",
    );

    assert_eq!(
        output,
        "process 0 running\n\
         process 1 created\n\
         process 1 running\n\
         process 2 created\n\
         process 1 running\n\
         process 1 running\n\
         process 2 running\n\
         process 1 running\n\
         process 1 running\n\
         2 processes destroyed\n"
    );
}

#[test]
fn test_script_errors_do_not_stop_the_run() {
    let output = run_script("cr 0\ncr 3\nrq 0 1\nrl 9 1\nde 16\nde 5\ncr 2\n");

    assert_eq!(
        output,
        "ERROR: Invalid priority 0: must be between 1 and 2\n\
         ERROR: Invalid priority 3: must be between 1 and 2\n\
         ERROR: The root process cannot request resources\n\
         ERROR: Invalid resource index 9\n\
         ERROR: Invalid process index 16\n\
         ERROR: Process 5 not found\n\
         process 1 created\n\
         process 1 running\n"
    );
}

#[test]
fn test_show_all_text() {
    let output = run_script("cr 2\nrq 3 2\nall\n");
    let dump: Vec<&str> = output.lines().skip(3).collect();

    assert_eq!(
        dump,
        vec![
            "running: 1",
            "process 0: priority 0, ready, children [1], held []",
            "process 1: priority 2, ready, children [], held [3:2]",
            "resource 0: 1/1 free, waiting []",
            "resource 1: 1/1 free, waiting []",
            "resource 2: 2/2 free, waiting []",
            "resource 3: 1/3 free, waiting []",
            "ready: 2: [1] | 1: [] | 0: [0]",
        ]
    );
}
