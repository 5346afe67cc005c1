//! Attendance reconciliation.
//!
//! Overlays an externally kept attendance record onto a roster built from the
//! thread. The external record is read-only; a working copy of its player map
//! tracks who was seen in a slot, and whoever is left over at the end goes to
//! the roster's reserve list.

use std::collections::BTreeMap;

use log::debug;

use crate::config::AttendanceExceptions;
use crate::engine::{DiagnosticKind, Diagnostics, Field};
use crate::{AttendanceStatus, EventDate, EventType, ExternalAttendance, Roster};

/// Copy external statuses onto `roster` and fill its reserve list.
///
/// Nothing is applied when `external` is absent. When its category differs
/// from `category` and `exceptions` does not list that date as a known
/// mismatch, the mismatch is reported and statuses stay `UNKNOWN`; the
/// reserve list is still filled.
pub fn reconcile(
    mut roster: Roster,
    category: EventType,
    date: Option<EventDate>,
    external: Option<&ExternalAttendance>,
    exceptions: &AttendanceExceptions,
    diagnostics: &mut Diagnostics,
) -> Roster {
    let Some(external) = external else {
        return roster;
    };

    let comparable = external.category == category || exceptions.accepts_category(date, external.category);
    if !comparable {
        diagnostics.push(
            DiagnosticKind::ReconciliationConflict,
            Field::Category,
            format!("external event on {} is {} instead of {}", display_date(date), external.category, category),
        );
    }

    let mut unseen: BTreeMap<&str, AttendanceStatus> =
        external.players.iter().map(|(player, status)| (player.as_str(), *status)).collect();

    for slot in &mut roster.slots {
        unseen.remove(slot.player.as_str());
        if !comparable {
            continue;
        }

        if let Some(status) = external.players.get(&slot.player) {
            slot.status = *status;
            continue;
        }
        if exceptions.unrecorded_players.contains(&slot.player) {
            continue;
        }
        if let Some(status) = exceptions.dated_status(date, &slot.player) {
            debug!("reconcile: dated exception for '{}' on {}: {}", slot.player, display_date(date), status);
            slot.status = status;
            continue;
        }

        diagnostics.push(
            DiagnosticKind::ReconciliationConflict,
            Field::Attendance,
            format!("external data has no record of '{}' on {}", slot.player, display_date(date)),
        );
    }

    for (player, status) in unseen {
        roster.push_reserve(player, status);
    }

    roster
}

fn display_date(date: Option<EventDate>) -> String {
    date.map_or_else(|| "an unknown date".to_string(), |d| d.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tables;
    use crate::{ReserveEntry, RoleCategory, SlotAssignment};

    fn slot(key: u32, player: &str) -> SlotAssignment {
        SlotAssignment {
            key,
            role: RoleCategory::Rfl,
            raw_role: None,
            player: player.to_string(),
            status: AttendanceStatus::Unknown,
            unconfirmed: false,
        }
    }

    fn roster(players: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for (i, player) in players.iter().enumerate() {
            roster.push_slot(slot(i as u32 + 1, player));
        }
        roster
    }

    fn exceptions() -> &'static AttendanceExceptions {
        &Tables::bundled().unwrap().attendance
    }

    fn statuses(roster: &Roster) -> Vec<AttendanceStatus> {
        roster.slots.iter().map(|s| s.status).collect()
    }

    #[test]
    fn leftover_external_players_become_reserve() {
        let external = ExternalAttendance::new(EventType::Coop)
            .with_player("A", AttendanceStatus::Appeared)
            .with_player("B", AttendanceStatus::NotAppeared);
        let mut diags = Diagnostics::new();
        let date = Some(EventDate::new(15, 3, 2014));

        let out = reconcile(roster(&["A"]), EventType::Coop, date, Some(&external), exceptions(), &mut diags);

        assert_eq!(statuses(&out), vec![AttendanceStatus::Appeared]);
        assert_eq!(out.reserve, vec![ReserveEntry { player: "B".to_string(), status: AttendanceStatus::NotAppeared }]);
        assert!(diags.is_empty());
        assert_eq!(external.players.len(), 2);
    }

    #[test]
    fn absent_external_leaves_roster_untouched() {
        let mut diags = Diagnostics::new();
        let out = reconcile(roster(&["A", "B"]), EventType::Coop, None, None, exceptions(), &mut diags);
        assert_eq!(out, roster(&["A", "B"]));
        assert!(diags.is_empty());
    }

    #[test]
    fn category_mismatch_leaves_statuses_unknown_but_fills_reserve() {
        let external = ExternalAttendance::new(EventType::Tvt)
            .with_player("A", AttendanceStatus::Appeared)
            .with_player("B", AttendanceStatus::NotAppeared);
        let mut diags = Diagnostics::new();
        let date = Some(EventDate::new(15, 3, 2014));

        let out = reconcile(roster(&["A"]), EventType::Coop, date, Some(&external), exceptions(), &mut diags);

        assert_eq!(statuses(&out), vec![AttendanceStatus::Unknown]);
        assert_eq!(out.reserve, vec![ReserveEntry { player: "B".to_string(), status: AttendanceStatus::NotAppeared }]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags.of_kind(DiagnosticKind::ReconciliationConflict).count(), 1);
    }

    #[test]
    fn known_category_mismatch_is_accepted() {
        let external = ExternalAttendance::new(EventType::CoopPlus).with_player("A", AttendanceStatus::Appeared);
        let mut diags = Diagnostics::new();
        let date = Some(EventDate::new(9, 1, 2015));

        let out = reconcile(roster(&["A"]), EventType::Coop, date, Some(&external), exceptions(), &mut diags);

        assert_eq!(statuses(&out), vec![AttendanceStatus::Appeared]);
        assert!(diags.is_empty());
    }

    #[test]
    fn missing_players_and_their_exceptions() {
        let external = ExternalAttendance::new(EventType::Coop).with_player("A", AttendanceStatus::Appeared);
        let mut diags = Diagnostics::new();
        let date = Some(EventDate::new(15, 1, 2015));

        // Kyrko was never tracked; Sunny has a dated correction for this day; Zed has neither.
        let slots = roster(&["A", "Kyrko", "Sunny", "Zed"]);
        let out = reconcile(slots, EventType::Coop, date, Some(&external), exceptions(), &mut diags);

        assert_eq!(
            statuses(&out),
            vec![
                AttendanceStatus::Appeared,
                AttendanceStatus::Unknown,
                AttendanceStatus::Appeared,
                AttendanceStatus::Unknown,
            ]
        );
        assert_eq!(diags.len(), 1);
        assert!(diags.iter().all(|d| d.message.contains("'Zed'")));
    }

    #[test]
    fn duplicate_slot_players_share_a_status() {
        let external = ExternalAttendance::new(EventType::Coop).with_player("A", AttendanceStatus::NotAppeared);
        let mut diags = Diagnostics::new();

        let out = reconcile(roster(&["A", "A"]), EventType::Coop, None, Some(&external), exceptions(), &mut diags);

        assert_eq!(statuses(&out), vec![AttendanceStatus::NotAppeared; 2]);
        assert!(out.reserve.is_empty());
    }
}
