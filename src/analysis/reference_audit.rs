//! Prüfung der Referenzpunkte eines Moduls.

use super::Finding;
use crate::core::{DataPath, ElementRef, Module, ReferenceKind, ReferencePoint};
use crate::store::{LookupError, ModuleStore};

#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub point: ReferencePoint,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditReport {
    pub module: DataPath,
    pub entries: Vec<AuditEntry>,
}

impl AuditReport {
    pub fn finding_count(&self) -> usize {
        self.entries.iter().map(|e| e.findings.len()).sum()
    }
}

/// Prüft jeden Referenzpunkt des Moduls `module`
pub fn audit_references(store: &ModuleStore, module: &DataPath) -> Result<AuditReport, LookupError> {
    let loaded = store.load(module)?;
    let entries = loaded
        .references
        .values()
        .map(|point| AuditEntry {
            point: point.clone(),
            findings: audit_point(store, &loaded, point),
        })
        .collect();
    Ok(AuditReport {
        module: module.clone(),
        entries,
    })
}

fn audit_point(store: &ModuleStore, module: &Module, point: &ReferencePoint) -> Vec<Finding> {
    let mut findings = Vec::new();

    let needs_label = matches!(
        point.kind,
        ReferenceKind::Signal | ReferenceKind::Switch | ReferenceKind::Register
    );
    if needs_label && point.label.trim().is_empty() {
        findings.push(Finding::MissingLabel {
            ref_nr: point.nr,
            kind: point.kind,
        });
    }

    let Some(element) = module.element(point.element_nr) else {
        findings.push(Finding::ReferenceWithoutElement {
            ref_nr: point.nr,
            element_nr: point.element_nr,
        });
        return findings;
    };
    let location = ElementRef::new(module.id.clone(), point.element_nr, point.direction);

    match point.kind {
        ReferenceKind::Signal => match store.signal_at(&location) {
            Ok(signal) => {
                let label = point.label.trim();
                if !label.is_empty()
                    && !signal.name.is_empty()
                    && !label.to_uppercase().contains(&signal.name.to_uppercase())
                {
                    findings.push(Finding::LabelMismatch {
                        ref_nr: point.nr,
                        label: label.to_string(),
                        signal: signal.display_name(),
                    });
                }
            }
            Err(_) => findings.push(Finding::ReferenceWithoutSignal {
                ref_nr: point.nr,
                location,
            }),
        },
        ReferenceKind::Switch => {
            let successors = element.successors(point.direction).len();
            if successors < 2 {
                findings.push(Finding::SwitchWithoutBranch {
                    ref_nr: point.nr,
                    successors,
                });
            }
        }
        _ => {}
    }

    findings
}
