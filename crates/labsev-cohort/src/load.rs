//! Column resolution and cell coercion into [`PatientRecord`]s.

use labsev_core::models::condition::ConditionTag;
use labsev_core::models::patient::{AdmissionId, DiseaseSeverities, PatientRecord};
use labsev_core::schema::{alias, column, REQUIRED_FLAGS};
use serde_json::Value;

use crate::error::CohortError;
use crate::source::{read_raw, CohortSource, ColumnConvention, RawTable, SourceError};
use crate::table::CohortTable;

/// Read a cohort table from disk. Expensive; cache the result for the
/// session (see [`crate::cache::CohortCache`]).
pub fn load_cohort(source: &CohortSource) -> Result<CohortTable, CohortError> {
    let wrap = |e: SourceError| CohortError::DataLoad {
        path: source.path.clone(),
        source: e,
    };

    let raw = read_raw(&source.path).map_err(wrap)?;
    let columns = ColumnMap::resolve(&raw, source.convention).map_err(wrap)?;
    let records = raw
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| columns.record(i + 1, row))
        .collect::<Result<Vec<_>, _>>()
        .map_err(wrap)?;

    let table = CohortTable::assemble(records, Some(source.path.clone()), columns.convention);
    tracing::info!(
        path = %source.path.display(),
        rows = table.len(),
        convention = ?columns.convention,
        "cohort loaded"
    );
    table.integrity().log();
    Ok(table)
}

/// Column position paired with the name it was found under.
type Column = (usize, &'static str);

struct ColumnMap {
    convention: ColumnConvention,
    subject_id: Column,
    admission_id: Column,
    flags: [Column; 3],
    label: Option<Column>,
    score: Option<Column>,
    disease: [Option<usize>; 3],
}

impl ColumnMap {
    fn resolve(raw: &RawTable, requested: ColumnConvention) -> Result<Self, SourceError> {
        for name in REQUIRED_FLAGS {
            require(raw, name)?;
        }

        let has_hadm = raw.has_column(column::HADM_ID);
        let admission_id = match (has_hadm, raw.has_column(alias::ADMISSION_ID)) {
            (true, true) => {
                tracing::warn!(
                    "both '{}' and '{}' present; using '{}'",
                    column::HADM_ID,
                    alias::ADMISSION_ID,
                    column::HADM_ID
                );
                column::HADM_ID
            }
            (true, false) => column::HADM_ID,
            (false, true) => alias::ADMISSION_ID,
            (false, false) => {
                return Err(SourceError::MissingColumn(column::HADM_ID.to_string()));
            }
        };

        let (convention, label, score) = severity_columns(raw, requested)?;
        if label.is_none() {
            tracing::warn!(
                convention = ?convention,
                "severity label column missing; every row is Unknown"
            );
        }
        if score.is_none() {
            tracing::warn!(convention = ?convention, "severity score column missing");
        }

        let flag = |tag: ConditionTag| -> Result<Column, SourceError> {
            Ok((require(raw, tag.flag_column())?, tag.flag_column()))
        };

        Ok(Self {
            convention,
            subject_id: (require(raw, column::SUBJECT_ID)?, column::SUBJECT_ID),
            admission_id: (require(raw, admission_id)?, admission_id),
            flags: [
                flag(ConditionTag::Ckd)?,
                flag(ConditionTag::Diabetes)?,
                flag(ConditionTag::Thyroid)?,
            ],
            label,
            score,
            disease: ConditionTag::ALL.map(|tag| raw.column_index(tag.severity_column())),
        })
    }

    fn record(&self, row_number: usize, row: &[Value]) -> Result<PatientRecord, SourceError> {
        let cell = |index: usize| row.get(index).unwrap_or(&NULL);
        let invalid = |name: &str, reason: String| SourceError::InvalidCell {
            row: row_number,
            column: name.to_string(),
            reason,
        };

        let (idx, name) = self.subject_id;
        let subject_id =
            coerce_text(cell(idx)).ok_or_else(|| invalid(name, "missing value".into()))?;

        let (idx, name) = self.admission_id;
        let admission_id = coerce_admission_id(cell(idx)).map_err(|r| invalid(name, r))?;

        let mut flags = [false; 3];
        for (slot, (idx, name)) in flags.iter_mut().zip(self.flags) {
            *slot = coerce_bool(cell(idx)).map_err(|r| invalid(name, r))?;
        }

        let mut disease_severity = DiseaseSeverities::default();
        for (tag, idx) in ConditionTag::ALL.into_iter().zip(self.disease) {
            disease_severity.set(tag, idx.and_then(|i| coerce_text(cell(i))));
        }

        let final_severity_label = self.label.and_then(|(idx, _)| coerce_text(cell(idx)));
        let final_severity_score = match self.score {
            Some((idx, name)) => coerce_f64(cell(idx)).map_err(|r| invalid(name, r))?,
            None => None,
        };

        Ok(PatientRecord {
            subject_id,
            admission_id,
            has_ckd: flags[0],
            has_diabetes: flags[1],
            has_thyroid: flags[2],
            disease_severity,
            final_severity_score,
            final_severity_label,
        })
    }
}

fn require(raw: &RawTable, name: &str) -> Result<usize, SourceError> {
    raw.column_index(name)
        .ok_or_else(|| SourceError::MissingColumn(name.to_string()))
}

fn lookup(raw: &RawTable, name: &'static str) -> Option<Column> {
    raw.column_index(name).map(|i| (i, name))
}

fn convention_of(column: Column) -> ColumnConvention {
    match column.1 {
        alias::LAB_SEVERITY_LABEL | alias::LAB_SEVERITY_SCORE => ColumnConvention::Lab,
        _ => ColumnConvention::Final,
    }
}

/// Pick the label and score columns. Under `Auto` each is resolved on its
/// own, preferring `final_*`; the reported convention is the label's (the
/// score's when there is no label column).
fn severity_columns(
    raw: &RawTable,
    requested: ColumnConvention,
) -> Result<(ColumnConvention, Option<Column>, Option<Column>), SourceError> {
    let final_label = lookup(raw, column::FINAL_SEVERITY_LABEL);
    let final_score = lookup(raw, column::FINAL_SEVERITY_SCORE);
    let lab_label = lookup(raw, alias::LAB_SEVERITY_LABEL);
    let lab_score = lookup(raw, alias::LAB_SEVERITY_SCORE);

    let (label, score) = match requested {
        ColumnConvention::Final => (final_label, final_score),
        ColumnConvention::Lab => (lab_label, lab_score),
        ColumnConvention::Auto => {
            if final_label.is_some() && lab_label.is_some() {
                tracing::warn!(
                    "both final_* and lab_* severity labels present; using final_*. \
                     Pin column_convention to silence this"
                );
            }
            (final_label.or(lab_label), final_score.or(lab_score))
        }
    };

    if let (Some(l), Some(s)) = (label, score)
        && convention_of(l) != convention_of(s)
    {
        tracing::warn!(
            label = l.1,
            score = s.1,
            "severity label and score come from different column conventions"
        );
    }

    let convention = match (label, score, requested) {
        (Some(column), _, _) | (None, Some(column), _) => convention_of(column),
        (None, None, ColumnConvention::Lab) => {
            return Err(SourceError::MissingColumn(
                alias::LAB_SEVERITY_LABEL.to_string(),
            ));
        }
        (None, None, ColumnConvention::Final) => {
            return Err(SourceError::MissingColumn(
                column::FINAL_SEVERITY_LABEL.to_string(),
            ));
        }
        (None, None, ColumnConvention::Auto) => {
            return Err(SourceError::MissingColumn(format!(
                "{} or {}",
                column::FINAL_SEVERITY_LABEL,
                alias::LAB_SEVERITY_LABEL
            )));
        }
    };
    Ok((convention, label, score))
}

static NULL: Value = Value::Null;

const NULL_MARKERS: [&str; 5] = ["nan", "none", "null", "<na>", "nat"];

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => {
            let s = s.trim();
            s.is_empty() || NULL_MARKERS.iter().any(|m| m.eq_ignore_ascii_case(s))
        }
        _ => false,
    }
}

/// Textual form of a cell, or `None` when absent. Integral numbers drop
/// their fractional part.
fn coerce_text(value: &Value) -> Option<String> {
    if is_absent(value) {
        return None;
    }
    match value {
        Value::String(s) => {
            let s = s.trim();
            // CSV exports write integral floats as "3.0"; match the JSON form.
            match s.parse::<f64>() {
                Ok(f) if s.parse::<i64>().is_err() && as_integer(f).is_some() => {
                    Some(format!("{f:.0}"))
                }
                _ => Some(s.to_string()),
            }
        }
        Value::Number(n) => Some(match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if as_integer(f).is_some() => format!("{f:.0}"),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn coerce_bool(value: &Value) -> Result<bool, String> {
    if is_absent(value) {
        return Ok(false);
    }
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" | "1.0" => Ok(true),
            "false" | "f" | "no" | "n" | "0" | "0.0" => Ok(false),
            other => Err(format!("'{other}' is not a boolean")),
        },
        other => Err(format!("{other} is not a boolean")),
    }
}

fn coerce_f64(value: &Value) -> Result<Option<f64>, String> {
    if is_absent(value) {
        return Ok(None);
    }
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(f) if f.is_nan() => Ok(None),
        Some(f) => Ok(Some(f)),
        None => Err(format!("{value} is not a number")),
    }
}

/// `f` as an `i64` when it is integral and representable. `i64::MAX as f64`
/// rounds up to 2^63, so the upper bound is exclusive.
fn as_integer(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn coerce_admission_id(value: &Value) -> Result<AdmissionId, String> {
    if is_absent(value) {
        return Err("missing value".to_string());
    }
    let id = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(as_integer)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(as_integer))
        }
        _ => None,
    };
    id.map(AdmissionId)
        .ok_or_else(|| format!("{value} is not an integer id"))
}
