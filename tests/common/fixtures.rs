//! Test fixtures - reusable content for tests.

pub const SFDX_PROJECT: &str = r#"{
  "packageDirectories": [{ "path": "force-app", "default": true }],
  "sourceApiVersion": "60.0"
}
"#;

/// Additions manifest as produced for a pure deletion
pub const EMPTY_PACKAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Package xmlns="http://soap.sforce.com/2006/04/metadata">
    <version>60.0</version>
</Package>
"#;

pub const TRIGGER_PATH: &str = "force-app/main/default/triggers/AccountTrigger.trigger";

/// Trigger calling a helper class that is being deleted
pub const ACCOUNT_TRIGGER: &str = "trigger AccountTrigger on Account (before insert) {
    AccountHelper.handle(Trigger.new);
    System.debug('done');
}
";

pub const SERVICE_PATH: &str = "force-app/main/default/classes/BillingService.cls";

/// Class referencing the deleted helper twice, with CRLF line endings
pub const BILLING_SERVICE: &str = "public class BillingService {\r
    public void run() {\r
        AccountHelper.prepare();\r
        AccountHelper.handle(null);\r
    }\r
}\r
";

pub const UNRELATED_PATH: &str = "force-app/main/default/classes/Unrelated.cls";

pub const UNRELATED_CLASS: &str = "public class Unrelated {
    public Integer answer() { return 42; }
}
";

/// Destructive manifest deleting the given Apex classes
pub fn destructive_classes(names: &[&str]) -> String {
    let members: String = names
        .iter()
        .map(|n| format!("        <members>{}</members>\n", n))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Package xmlns="http://soap.sforce.com/2006/04/metadata">
    <types>
{}        <name>ApexClass</name>
    </types>
    <version>60.0</version>
</Package>
"#,
        members
    )
}
