//! Custom test assertions

use pms_access::GroupStore;
use uuid::Uuid;

/// Assert the exact set of groups an account holds
pub async fn assert_groups<S: GroupStore + ?Sized>(store: &S, account_id: Uuid, expected: &[&str]) {
    let mut actual = store
        .memberships(account_id)
        .await
        .expect("Failed to read memberships");
    actual.sort();

    let mut expected: Vec<String> = expected.iter().map(|g| g.to_string()).collect();
    expected.sort();

    assert_eq!(
        actual, expected,
        "Unexpected groups for account {}",
        account_id
    );
}
