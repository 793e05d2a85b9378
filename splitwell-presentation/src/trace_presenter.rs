use crate::{
    labels,
    member_label::member_label,
    text_table::{Column, TextTableBuilder},
};
use splitwell_domain::SimplificationStep;
use std::{borrow::Cow, fmt::Write as _};

const COLUMNS: &[Column<'static>] = &[
    Column::left(labels::MARK),
    Column::left(labels::FROM),
    Column::left(labels::TO),
    Column::right(labels::AMOUNT),
];

pub struct TracePresenter;

impl TracePresenter {
    /// Renders snapshots pairwise: the graph before a rewrite with its
    /// operands marked `*`, then the graph after it with inserted edges
    /// marked `+`.
    pub fn render(steps: &[SimplificationStep<'_>]) -> String {
        let mut reply = String::with_capacity(256 * steps.len().max(1));

        for (idx, step) in steps.iter().enumerate() {
            if idx > 0 {
                reply.push('\n');
            }
            let title = match step.rule {
                None => Cow::Borrowed(labels::ALREADY_MINIMAL),
                Some(rule) if idx % 2 == 0 => {
                    Cow::Owned(format!("Step {}: apply {rule}", idx / 2 + 1))
                }
                Some(rule) => Cow::Owned(format!("Step {}: after {rule}", idx / 2 + 1)),
            };
            let _ = writeln!(&mut reply, "{title}");
            reply.push_str(&Self::render_snapshot(step));
        }

        reply
    }

    fn render_snapshot(step: &SimplificationStep<'_>) -> String {
        if step.settlements.is_empty() {
            return format!("{}\n", labels::NO_DEBTS);
        }

        TextTableBuilder::new(COLUMNS)
            .rows(step.settlements.iter().enumerate().map(|(idx, settlement)| {
                let mark = if step.highlighted_indices.contains(&idx) {
                    labels::HIGHLIGHTED
                } else if step.result_indices.contains(&idx) {
                    labels::INSERTED
                } else {
                    ""
                };
                [
                    Cow::Borrowed(mark),
                    member_label(settlement.from),
                    member_label(settlement.to),
                    Cow::Owned(settlement.amount.to_string()),
                ]
            }))
            .build()
    }
}
