use super::*;
use crate::router::{LOGIN, TODOS};

#[test]
fn decide_truth_table() {
    assert_eq!(decide(false, false), Decision::Proceed);
    assert_eq!(decide(false, true), Decision::Proceed);
    assert_eq!(decide(true, true), Decision::Proceed);
    assert_eq!(decide(true, false), Decision::RedirectToLogin);
}

#[test]
fn guard_redirects_protected_route_when_logged_out() {
    let guard = RouteGuard::new(AuthStore::new());
    assert_eq!(guard.before_each(&TODOS), Decision::RedirectToLogin);
}

#[test]
fn guard_allows_protected_route_when_logged_in() {
    let auth = AuthStore::new();
    let guard = RouteGuard::new(auth.clone());
    auth.set_auth("abc", "alice");
    assert_eq!(guard.before_each(&TODOS), Decision::Proceed);
}

#[test]
fn guard_always_allows_login() {
    let auth = AuthStore::new();
    let guard = RouteGuard::new(auth.clone());
    assert_eq!(guard.before_each(&LOGIN), Decision::Proceed);
    auth.set_auth("abc", "alice");
    assert_eq!(guard.before_each(&LOGIN), Decision::Proceed);
}
