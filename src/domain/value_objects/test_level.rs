//! Test execution policy passed to the deployment engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TestLevel {
    /// Skip Apex tests (only allowed outside production)
    #[default]
    NoTestRun,
    RunLocalTests,
    RunAllTestsInOrg,
}

impl TestLevel {
    /// Value for `--test-level`
    pub fn as_str(&self) -> &'static str {
        match self {
            TestLevel::NoTestRun => "NoTestRun",
            TestLevel::RunLocalTests => "RunLocalTests",
            TestLevel::RunAllTestsInOrg => "RunAllTestsInOrg",
        }
    }
}

impl fmt::Display for TestLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "notestrun" | "none" => Ok(TestLevel::NoTestRun),
            "runlocaltests" | "local" => Ok(TestLevel::RunLocalTests),
            "runalltestsinorg" | "all" => Ok(TestLevel::RunAllTestsInOrg),
            other => Err(format!("unknown test level '{}'", other)),
        }
    }
}
