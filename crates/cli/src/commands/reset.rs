use super::Session;

pub(crate) fn cmd_reset(session: &Session, yes: bool) {
    if !yes {
        session.fail("reset deletes all progress; pass --yes to confirm");
    }
    let existed = match session.repo.reset() {
        Ok(existed) => existed,
        Err(e) => session.fail(&format!("error resetting challenge: {}", e)),
    };
    session.emit(
        if existed {
            "Challenge reset."
        } else {
            "No challenge to reset."
        },
        &serde_json::json!({ "reset": existed }),
    );
}
