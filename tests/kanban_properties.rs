//! Property tests for the Kanban partition.

use proptest::prelude::*;

use telesecundaria::domain::academic_cycle::CycleName;
use telesecundaria::domain::foundation::{AccountId, StoredFileName, Timestamp};
use telesecundaria::domain::planning::{KanbanBoard, PeriodLabel, PlanningDocument, TeacherRef};

const PERIODS: [&str; 2] = ["SEP-Q1", "OCT-Q1"];

/// (teacher index, period index, approved, seconds offset)
fn document_strategy(teachers: usize) -> impl Strategy<Value = (usize, usize, bool, i64)> {
    (0..teachers, 0..PERIODS.len(), any::<bool>(), 0i64..100_000)
}

fn roster(count: usize) -> Vec<TeacherRef> {
    (0..count)
        .map(|i| TeacherRef {
            id: AccountId::new(),
            full_name: format!("Maestro {}", i),
        })
        .collect()
}

fn document(
    teacher: AccountId,
    cycle: &CycleName,
    period: &str,
    approved: bool,
    offset: i64,
) -> PlanningDocument {
    let at = Timestamp::from_unix_secs(1_725_000_000 + offset).unwrap();
    let mut doc = PlanningDocument::submit(
        teacher,
        cycle.clone(),
        PeriodLabel::new(period).unwrap(),
        StoredFileName::derive("plan.pdf", &at).unwrap(),
        "",
        at,
    )
    .unwrap();
    if approved {
        doc.approve("ok").unwrap();
    }
    doc
}

proptest! {
    #[test]
    fn partition_places_every_teacher_and_document_correctly(
        (teacher_count, specs) in (1usize..6).prop_flat_map(|n| {
            (Just(n), proptest::collection::vec(document_strategy(n), 0..20))
        })
    ) {
        let cycle = CycleName::new("2024-2025").unwrap();
        let period = PeriodLabel::new(PERIODS[0]).unwrap();
        let teachers = roster(teacher_count);
        let documents: Vec<PlanningDocument> = specs
            .iter()
            .map(|(t, p, approved, offset)| {
                document(teachers[*t].id, &cycle, PERIODS[*p], *approved, *offset)
            })
            .collect();

        let board = KanbanBoard::partition(
            cycle.clone(),
            period.clone(),
            &teachers,
            documents,
        );

        let in_pair: Vec<&(usize, usize, bool, i64)> =
            specs.iter().filter(|(_, p, _, _)| *p == 0).collect();

        // Documents of other periods never reach the board
        prop_assert_eq!(board.in_review.len() + board.approved.len(), in_pair.len());

        for (index, teacher) in teachers.iter().enumerate() {
            let reviewing = in_pair.iter().filter(|(t, _, a, _)| *t == index && !*a).count();
            let approved = in_pair.iter().filter(|(t, _, a, _)| *t == index && *a).count();

            prop_assert_eq!(board.in_review_for(teacher.id), reviewing);
            prop_assert_eq!(board.approved_for(teacher.id), approved);
            prop_assert_eq!(board.is_pending(teacher.id), reviewing + approved == 0);
        }

        // Columns are newest first
        for column in [&board.in_review, &board.approved] {
            prop_assert!(column.windows(2).all(|w| w[0].uploaded_at >= w[1].uploaded_at));
        }
    }

    #[test]
    fn other_cycles_never_reach_the_board(count in 1usize..10) {
        let current = CycleName::new("2024-2025").unwrap();
        let previous = CycleName::new("2023-2024").unwrap();
        let teachers = roster(1);
        let documents: Vec<PlanningDocument> = (0..count)
            .map(|i| document(teachers[0].id, &previous, PERIODS[0], i % 2 == 0, i as i64))
            .collect();

        let board = KanbanBoard::partition(
            current,
            PeriodLabel::new(PERIODS[0]).unwrap(),
            &teachers,
            documents,
        );

        prop_assert!(board.in_review.is_empty());
        prop_assert!(board.approved.is_empty());
        prop_assert!(board.is_pending(teachers[0].id));
    }
}
