use anyhow::{bail, Context, Result};

use super::criteria::{NumericAttribute, RangeCriterion, SearchCriteria};
use crate::catalog::{ConductivityLevel, TypicalForm};

/// Command-line shorthand for a min/max pair.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundExpr {
    AtLeast(f64),
    AtMost(f64),
    Between(f64, f64), // Inclusive range: N-M
    Exactly(f64),
}

impl BoundExpr {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Empty bound expression");
        }
        if let Some(val) = s.strip_prefix(">=") {
            Ok(BoundExpr::AtLeast(parse_number(val)?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(BoundExpr::AtMost(parse_number(val)?))
        } else if s.starts_with('>') || s.starts_with('<') {
            bail!("Bounds are inclusive, use >= or <= instead of '{}'", s)
        } else if let Some((low, high)) = split_range(s) {
            let low = parse_number(low)?;
            let high = parse_number(high)?;
            Ok(BoundExpr::Between(low, high))
        } else {
            Ok(BoundExpr::Exactly(parse_number(s)?))
        }
    }

    /// The (min, max) pair this expression sets
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            BoundExpr::AtLeast(n) => (Some(*n), None),
            BoundExpr::AtMost(n) => (None, Some(*n)),
            BoundExpr::Between(low, high) => (Some(*low), Some(*high)),
            BoundExpr::Exactly(n) => (Some(*n), Some(*n)),
        }
    }

    /// Replace both bounds of `criterion`, keeping its priority
    pub fn apply(&self, criterion: &mut RangeCriterion) {
        let (min, max) = self.bounds();
        criterion.min = min;
        criterion.max = max;
    }
}

fn parse_number(s: &str) -> Result<f64> {
    let s = s.trim();
    let value: f64 = s
        .parse()
        .with_context(|| format!("'{}' is not a number", s))?;
    if !value.is_finite() {
        bail!("'{}' is not a finite number", s);
    }
    Ok(value)
}

/// Split "N-M" on the range dash. A leading sign and exponent signs
/// ("1e-6-1e-3") are not separators.
fn split_range(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    (1..bytes.len())
        .find(|&i| bytes[i] == b'-' && !matches!(bytes[i - 1], b'e' | b'E' | b'-'))
        .map(|i| (&s[..i], &s[i + 1..]))
}

/// What a `KEY=N` priority assignment targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriorityTarget {
    Numeric(NumericAttribute),
    Cost,
    Form,
}

impl PriorityTarget {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("cost") {
            return Ok(PriorityTarget::Cost);
        }
        if s.eq_ignore_ascii_case("form") {
            return Ok(PriorityTarget::Form);
        }
        match s.parse::<NumericAttribute>() {
            Ok(attr) => Ok(PriorityTarget::Numeric(attr)),
            Err(e) => bail!("{} (expected an attribute name, 'cost' or 'form')", e),
        }
    }

    pub fn assign(&self, criteria: &mut SearchCriteria, priority: i32) {
        match self {
            PriorityTarget::Numeric(attr) => attr.criterion_mut(criteria).priority = Some(priority),
            PriorityTarget::Cost => criteria.cost_priority = Some(priority),
            PriorityTarget::Form => criteria.form_priority = Some(priority),
        }
    }
}

/// Parse "KEY=N", e.g. "hardness=3" or "cost=5".
///
/// The number is taken verbatim; range checks are left to criteria validation.
pub fn parse_priority_assignment(s: &str) -> Result<(PriorityTarget, i32)> {
    let Some((key, value)) = s.split_once('=') else {
        bail!("Priority must look like KEY=N: {}", s);
    };
    let target = PriorityTarget::parse(key)?;
    let priority: i32 = value
        .trim()
        .parse()
        .with_context(|| format!("Priority for '{}' must be an integer, got '{}'", key.trim(), value.trim()))?;
    Ok((target, priority))
}

/// Criteria typed on the command line, layered over a saved search or
/// criteria file. Bounds go first and priorities last, so `--priority`
/// also weights a bound given in the same invocation.
#[derive(Debug, Clone, Default)]
pub struct CriteriaOverrides {
    /// Unparsed bound expressions per attribute
    pub bounds: Vec<(NumericAttribute, String)>,
    pub level: Option<ConductivityLevel>,
    pub max_cost: Option<u8>,
    pub form: Option<TypicalForm>,
    /// Unparsed `KEY=N` assignments
    pub priorities: Vec<String>,
}

impl CriteriaOverrides {
    pub fn apply(&self, criteria: &mut SearchCriteria) -> Result<()> {
        for (attr, expr) in &self.bounds {
            let bound = BoundExpr::parse(expr)
                .with_context(|| format!("Invalid --{} '{}'", attr.key().replace('_', "-"), expr))?;
            bound.apply(attr.criterion_mut(criteria));
        }

        if self.level.is_some() {
            criteria.electrical_conductivity_level = self.level;
        }
        if self.max_cost.is_some() {
            criteria.relative_cost_max = self.max_cost;
        }
        if self.form.is_some() {
            criteria.typical_form = self.form;
        }

        for assignment in &self.priorities {
            let (target, priority) = parse_priority_assignment(assignment)?;
            target.assign(criteria, priority);
        }

        Ok(())
    }
}
