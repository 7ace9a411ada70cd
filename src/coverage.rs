//! Functional coverage collection and export.
//!
//! Tracks which operand and selector values the generator has exercised:
//! one cover point per input field plus the full `a × b × op` cross. The model
//! is written once per generated transaction and exported once at the end of
//! the run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::common::constants::{OPERAND_VALUES, OP_VALUES};
use crate::common::data::Transaction;
use crate::common::error::{HarnessError, HarnessResult};

const CROSS_BINS: usize = OPERAND_VALUES * OPERAND_VALUES * OP_VALUES;

/// Hit counters for one input field.
#[derive(Debug, Clone)]
pub struct CoverPoint {
    name: &'static str,
    hits: Vec<u64>,
}

impl CoverPoint {
    fn new(name: &'static str, bins: usize) -> Self {
        Self {
            name,
            hits: vec![0; bins],
        }
    }

    fn hit(&mut self, value: u8) {
        if let Some(count) = self.hits.get_mut(value as usize) {
            *count += 1;
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn hits(&self, value: u8) -> u64 {
        self.hits.get(value as usize).copied().unwrap_or(0)
    }

    pub fn covered(&self) -> usize {
        self.hits.iter().filter(|h| **h > 0).count()
    }

    pub fn size(&self) -> usize {
        self.hits.len()
    }

    fn report(&self) -> CoverPointReport {
        CoverPointReport {
            name: self.name,
            size: self.size(),
            covered: self.covered(),
            percent: percent(self.covered(), self.size()),
            bins: self
                .hits
                .iter()
                .enumerate()
                .map(|(value, hits)| BinReport {
                    value: value as u8,
                    hits: *hits,
                })
                .collect(),
        }
    }
}

/// Coverage model for the ALU stimulus.
#[derive(Debug, Clone)]
pub struct CoverageDb {
    a: CoverPoint,
    b: CoverPoint,
    op: CoverPoint,
    cross: Vec<u64>,
    samples: u64,
}

impl Default for CoverageDb {
    fn default() -> Self {
        Self {
            a: CoverPoint::new("top.a", OPERAND_VALUES),
            b: CoverPoint::new("top.b", OPERAND_VALUES),
            op: CoverPoint::new("top.op", OP_VALUES),
            cross: vec![0; CROSS_BINS],
            samples: 0,
        }
    }
}

impl CoverageDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `(a, b, op)` in every bin it falls into.
    pub fn sample(&mut self, a: u8, b: u8, op: u8) {
        self.a.hit(a);
        self.b.hit(b);
        self.op.hit(op);
        if let Some(index) = cross_index(a, b, op) {
            self.cross[index] += 1;
        }
        self.samples += 1;
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn point_a(&self) -> &CoverPoint {
        &self.a
    }

    pub fn point_b(&self) -> &CoverPoint {
        &self.b
    }

    pub fn point_op(&self) -> &CoverPoint {
        &self.op
    }

    /// Hit count of one cross bin.
    pub fn cross_hits(&self, a: u8, b: u8, op: u8) -> u64 {
        cross_index(a, b, op)
            .map(|index| self.cross[index])
            .unwrap_or(0)
    }

    pub fn cross_covered(&self) -> usize {
        self.cross.iter().filter(|h| **h > 0).count()
    }

    pub fn report(&self) -> CoverageReport {
        let mut hit_bins = Vec::new();
        for (index, hits) in self.cross.iter().enumerate() {
            if *hits > 0 {
                let (a, b, op) = cross_value(index);
                hit_bins.push(CrossBinReport { a, b, op, hits: *hits });
            }
        }

        CoverageReport {
            samples: self.samples,
            points: vec![self.a.report(), self.b.report(), self.op.report()],
            cross: CrossReport {
                name: "top.all_cases",
                items: vec![self.a.name, self.b.name, self.op.name],
                size: CROSS_BINS,
                covered: self.cross_covered(),
                percent: percent(self.cross_covered(), CROSS_BINS),
                bins: hit_bins,
            },
        }
    }
}

fn cross_index(a: u8, b: u8, op: u8) -> Option<usize> {
    let (a, b, op) = (a as usize, b as usize, op as usize);
    if a < OPERAND_VALUES && b < OPERAND_VALUES && op < OP_VALUES {
        Some((a * OPERAND_VALUES + b) * OP_VALUES + op)
    } else {
        None
    }
}

fn cross_value(index: usize) -> (u8, u8, u8) {
    let op = index % OP_VALUES;
    let ab = index / OP_VALUES;
    ((ab / OPERAND_VALUES) as u8, (ab % OPERAND_VALUES) as u8, op as u8)
}

fn percent(covered: usize, size: usize) -> f64 {
    if size == 0 {
        0.0
    } else {
        covered as f64 * 100.0 / size as f64
    }
}

/// Shared handle onto the run's coverage model.
///
/// The generator samples through one clone; the coordinator exports through
/// another once the run budget has expired.
#[derive(Debug, Clone, Default)]
pub struct Coverage {
    db: Arc<Mutex<CoverageDb>>,
}

impl Coverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples the stimulus fields of `item`.
    pub fn sample(&self, item: &Transaction) {
        self.db().sample(item.a, item.b, item.op);
    }

    pub fn report(&self) -> CoverageReport {
        self.db().report()
    }

    /// Serializes the model as JSON to `path`.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> HarnessResult<CoverageReport> {
        let path = path.as_ref();
        let report = self.report();
        let export_err = |source: std::io::Error| HarnessError::CoverageExport {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(export_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writer.flush().map_err(export_err)?;
        Ok(report)
    }

    fn db(&self) -> MutexGuard<'_, CoverageDb> {
        self.db.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Serialized form of the coverage model.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub samples: u64,
    pub points: Vec<CoverPointReport>,
    pub cross: CrossReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverPointReport {
    pub name: &'static str,
    pub size: usize,
    pub covered: usize,
    pub percent: f64,
    pub bins: Vec<BinReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinReport {
    pub value: u8,
    pub hits: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrossReport {
    pub name: &'static str,
    pub items: Vec<&'static str>,
    pub size: usize,
    pub covered: usize,
    pub percent: f64,
    /// Bins hit at least once.
    pub bins: Vec<CrossBinReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrossBinReport {
    pub a: u8,
    pub b: u8,
    pub op: u8,
    pub hits: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_hits_every_dimension() {
        let mut db = CoverageDb::new();
        db.sample(5, 3, 0);
        db.sample(5, 4, 2);

        assert_eq!(db.samples(), 2);
        assert_eq!(db.point_a().hits(5), 2);
        assert_eq!(db.point_b().hits(3), 1);
        assert_eq!(db.point_op().hits(2), 1);
        assert_eq!(db.cross_hits(5, 3, 0), 1);
        assert_eq!(db.cross_hits(5, 4, 2), 1);
        assert_eq!(db.cross_covered(), 2);
    }

    #[test]
    fn cross_index_round_trips() {
        for index in [0, 1, 63, 511, CROSS_BINS - 1] {
            let (a, b, op) = cross_value(index);
            assert_eq!(cross_index(a, b, op), Some(index));
        }
        assert_eq!(cross_index(16, 0, 0), None);
    }

    #[test]
    fn report_lists_only_hit_cross_bins() {
        let mut db = CoverageDb::new();
        for op in 0..4 {
            db.sample(15, 15, op);
        }
        let report = db.report();
        assert_eq!(report.cross.covered, 4);
        assert_eq!(report.cross.bins.len(), 4);
        assert_eq!(report.points[2].covered, 4);
        assert!((report.points[2].percent - 100.0).abs() < f64::EPSILON);
        assert_eq!(report.points[0].bins.len(), 16);
    }
}
