//! Assertion macros with descriptive failure messages.

/// Assert that a project file has exactly the expected content.
///
/// # Example
/// ```ignore
/// assert_file_eq!(env, TRIGGER_PATH, ACCOUNT_TRIGGER);
/// ```
#[macro_export]
macro_rules! assert_file_eq {
    ($env:expr, $path:expr, $expected:expr) => {
        let actual = $env.read_project_file($path);
        assert!(
            actual == $expected,
            "Content of '{}' differs.\n--- expected\n{}\n--- actual\n{}",
            $path,
            $expected,
            actual
        );
    };
}

/// Assert that command output (stdout + stderr) contains a string.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let output = $result.combined_output();
        assert!(
            output.contains($needle),
            "Expected output to contain '{}'.\nOutput:\n{}",
            $needle,
            output
        );
    };
}
