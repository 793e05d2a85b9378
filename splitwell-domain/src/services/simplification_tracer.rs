//! Step-by-step rewrite of the raw debt graph into the minimal payment plan.
//!
//! The tracer repeatedly applies the first matching rule (merge, opposite,
//! chain, swap; each tier scanning index pairs in ascending order) and
//! snapshots the graph before and after every rewrite. Every rule preserves
//! each member's net position.
//!
//! Once merge/opposite/chain no longer match, no member both owes and is
//! owed, so the graph is bipartite between debtors and creditors. The swap
//! rule then removes *crossings*: an earlier debtor paying a later creditor
//! while a later debtor pays an earlier creditor (order = member input
//! order). A bipartite plan without duplicates or crossings is exactly the
//! plan the greedy [`SettlementCalculator`](super::SettlementCalculator)
//! produces, which is where the trace ends.

use crate::{
    model::{SimplificationRule, SimplificationStep, StepIndices},
    validation::{DebtEdge, ValidatedLedger},
};
use smallvec::{SmallVec, smallvec};
use splitwell_money::Money;

/// Simplification trace service
pub struct SimplificationTracer;

#[derive(Debug, PartialEq, Eq)]
struct Rewrite {
    rule: SimplificationRule,
    operands: StepIndices,
    replacements: SmallVec<[DebtEdge; 3]>,
}

impl SimplificationTracer {
    pub(crate) fn trace<'m>(
        &self,
        ledger: &ValidatedLedger<'m>,
        raw_edges: Vec<DebtEdge>,
    ) -> Vec<SimplificationStep<'m>> {
        let mut edges = raw_edges;
        let mut steps = Vec::new();

        while let Some(rewrite) = find_rewrite(&edges) {
            tracing::trace!(
                rule = %rewrite.rule,
                operands = ?rewrite.operands.as_slice(),
                edge_count = edges.len(),
                "Applying simplification rule"
            );

            steps.push(SimplificationStep {
                settlements: ledger.settlements(&edges),
                highlighted_indices: rewrite.operands.clone(),
                result_indices: StepIndices::new(),
                rule: Some(rewrite.rule),
            });

            let inserted = apply(&mut edges, &rewrite);

            steps.push(SimplificationStep {
                settlements: ledger.settlements(&edges),
                highlighted_indices: StepIndices::new(),
                result_indices: inserted,
                rule: Some(rewrite.rule),
            });
        }

        if steps.is_empty() {
            steps.push(SimplificationStep {
                settlements: ledger.settlements(&edges),
                highlighted_indices: StepIndices::new(),
                result_indices: StepIndices::new(),
                rule: None,
            });
        }

        tracing::debug!(
            rewrite_count = steps.len() / 2,
            final_edge_count = edges.len(),
            "Simplification trace complete"
        );

        steps
    }
}

fn find_rewrite(edges: &[DebtEdge]) -> Option<Rewrite> {
    find_merge(edges)
        .or_else(|| find_opposite(edges))
        .or_else(|| find_chain(edges))
        .or_else(|| find_swap(edges))
}

/// Removes the operands (survivors keep their order), appends the
/// replacements and returns the positions they landed on.
fn apply(edges: &mut Vec<DebtEdge>, rewrite: &Rewrite) -> StepIndices {
    let mut operands = rewrite.operands.clone();
    operands.sort_unstable_by(|a, b| b.cmp(a));
    for idx in operands {
        edges.remove(idx);
    }

    let start = edges.len();
    edges.extend(rewrite.replacements.iter().copied());
    (start..edges.len()).collect()
}

fn edge(from: usize, to: usize, amount: Money) -> DebtEdge {
    DebtEdge { from, to, amount }
}

fn unordered_pairs(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).flat_map(move |i| (i + 1..len).map(move |j| (i, j)))
}

fn ordered_pairs(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).flat_map(move |i| (0..len).filter(move |&j| j != i).map(move |j| (i, j)))
}

fn find_merge(edges: &[DebtEdge]) -> Option<Rewrite> {
    unordered_pairs(edges.len()).find_map(|(i, j)| {
        let (a, b) = (edges[i], edges[j]);
        (a.from == b.from && a.to == b.to).then(|| Rewrite {
            rule: SimplificationRule::Merge,
            operands: smallvec![i, j],
            replacements: smallvec![edge(a.from, a.to, a.amount + b.amount)],
        })
    })
}

fn find_opposite(edges: &[DebtEdge]) -> Option<Rewrite> {
    unordered_pairs(edges.len()).find_map(|(i, j)| {
        let (a, b) = (edges[i], edges[j]);
        if a.from != b.to || a.to != b.from {
            return None;
        }

        let net = a.amount - b.amount;
        let replacements = if net.is_positive() {
            smallvec![edge(a.from, a.to, net)]
        } else if net.is_negative() {
            smallvec![edge(b.from, b.to, -net)]
        } else {
            SmallVec::new()
        };

        Some(Rewrite {
            rule: SimplificationRule::Opposite,
            operands: smallvec![i, j],
            replacements,
        })
    })
}

fn find_chain(edges: &[DebtEdge]) -> Option<Rewrite> {
    ordered_pairs(edges.len()).find_map(|(i, j)| {
        let (first, second) = (edges[i], edges[j]);
        if first.to != second.from || first.from == second.to {
            return None;
        }

        let moved = first.amount.min(second.amount);
        let mut replacements: SmallVec<[DebtEdge; 3]> =
            smallvec![edge(first.from, second.to, moved)];
        if first.amount > moved {
            replacements.push(edge(first.from, first.to, first.amount - moved));
        }
        if second.amount > moved {
            replacements.push(edge(second.from, second.to, second.amount - moved));
        }

        Some(Rewrite {
            rule: SimplificationRule::Chain,
            operands: smallvec![i, j],
            replacements,
        })
    })
}

/// Uncrosses `i: A -> Y` and `j: B -> X` where `A < B` and `X < Y`.
///
/// `t = min(i, j)` moves onto `A -> X` (the pivot `s0`, created when absent)
/// and `B -> Y`; whichever of `i`/`j` still has an amount left stays as a
/// residual.
fn find_swap(edges: &[DebtEdge]) -> Option<Rewrite> {
    ordered_pairs(edges.len()).find_map(|(i, j)| {
        let (early, late) = (edges[i], edges[j]);
        if !(early.from < late.from && late.to < early.to) {
            return None;
        }

        let pivot = edges
            .iter()
            .position(|candidate| candidate.from == early.from && candidate.to == late.to);
        let moved = early.amount.min(late.amount);
        let pivot_amount = pivot.map_or(Money::ZERO, |idx| edges[idx].amount);

        let mut operands = StepIndices::new();
        operands.extend(pivot);
        operands.extend([i, j]);

        let mut replacements: SmallVec<[DebtEdge; 3]> = smallvec![
            edge(early.from, late.to, pivot_amount + moved),
            edge(late.from, early.to, moved),
        ];
        if early.amount > moved {
            replacements.push(edge(early.from, early.to, early.amount - moved));
        } else if late.amount > moved {
            replacements.push(edge(late.from, late.to, late.amount - moved));
        }

        Some(Rewrite {
            rule: SimplificationRule::Swap,
            operands,
            replacements,
        })
    })
}
