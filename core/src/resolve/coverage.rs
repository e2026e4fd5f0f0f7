//! Scan coverage: the axial extent of a series

use crate::error::Result;
use crate::header::Header;
use crate::types::{Anatomy, Info, PixelKind, SliceTable, IMAGE_POSITION_PATIENT};
use log::{error, info, warn};
use serde_json::Value;

/// Coverage below which a scan is a head scan (mm)
pub const HEAD_MAX_COVERAGE_MM: f64 = 250.0;
/// Coverage above which a scan is chest/abdomen/pelvis (mm)
pub const CAP_MIN_COVERAGE_MM: f64 = 800.0;
/// Coverage above which a scan is whole body (mm)
pub const WHOLE_BODY_MIN_COVERAGE_MM: f64 = 1300.0;

/// Extent of the z positions of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanCoverage {
    /// `|max_z - min_z|`
    pub coverage: f64,
    pub max_z: f64,
    pub min_z: f64,
}

/// Computes the scan coverage from `ImagePositionPatient`
///
/// Returns `None` (logging the reason) if the column is missing, or any
/// position is null, not a list, not three elements long, or has a
/// non-numeric z.
///
/// ```
/// use scancat_core::resolve::compute_scan_coverage;
/// use scancat_core::SliceTable;
///
/// let table = SliceTable::from_positions([[1.0, 2.0, 3.2], [1.0, 2.0, 3.4]]);
/// let coverage = compute_scan_coverage(&table).unwrap();
/// assert!((coverage.coverage - 0.2).abs() < 1e-9);
/// assert_eq!(coverage.max_z, 3.4);
/// assert_eq!(coverage.min_z, 3.2);
/// ```
pub fn compute_scan_coverage(table: &SliceTable) -> Option<ScanCoverage> {
    info!("Attempting to compute scan coverage...");

    let Some(positions) = table.column(IMAGE_POSITION_PATIENT) else {
        error!(
            "Cannot compute scan coverage. 'ImagePositionPatient' not in slice table. \
             This is required."
        );
        return None;
    };
    if positions.is_empty() {
        error!("Cannot compute scan coverage. Slice table is empty.");
        return None;
    }
    if positions.iter().any(|p| p.is_null()) {
        error!(
            "Cannot compute scan coverage. Some or all 'ImagePositionPatient' values of \
             slices are missing."
        );
        return None;
    }

    let mut lists = Vec::with_capacity(positions.len());
    for position in &positions {
        match position {
            Value::Array(items) => lists.push(items),
            _ => {
                error!(
                    "Cannot compute scan coverage. Some or all 'ImagePositionPatient' values \
                     are not lists."
                );
                return None;
            }
        }
    }
    if lists.iter().any(|items| items.len() != 3) {
        error!(
            "Cannot compute scan coverage. Some or all 'ImagePositionPatient' values of \
             slices are not length 3."
        );
        return None;
    }

    let mut z_positions = Vec::with_capacity(lists.len());
    for items in &lists {
        match items[2].as_f64() {
            Some(z) => z_positions.push(z),
            None => {
                error!(
                    "Cannot compute scan coverage. Some or all 'ImagePositionPatient' z-axis \
                     values of slices are not numeric."
                );
                return None;
            }
        }
    }

    let max_z = z_positions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_z = z_positions.iter().copied().fold(f64::INFINITY, f64::min);
    let coverage = (max_z - min_z).abs();
    info!("Computed scan coverage ({})", coverage);

    Some(ScanCoverage {
        coverage,
        max_z,
        min_z,
    })
}

/// Computes the scan coverage only for `ORIGINAL` series
///
/// On success the returned [`Info`] carries `ScanCoverage`,
/// `MaxSliceLocation` and `MinSliceLocation` (each only when non-zero).
///
/// # Errors
///
/// Returns [`ScancatError::InvalidImageType`](crate::error::ScancatError::InvalidImageType)
/// if the header `ImageType` is present but not a list.
pub fn compute_scan_coverage_if_original(
    header: &Header,
    table: &SliceTable,
) -> Result<(Option<f64>, Info)> {
    info!("Checking if header 'ImageType' == 'ORIGINAL' to determine if scan coverage should be computed...");
    let mut info = Info::new();

    let image_type = match header.image_type()? {
        Some(image_type) if !image_type.is_empty() => image_type,
        _ => {
            warn!(
                "Cannot determine if scan coverage should be computed. Could not find \
                 'ImageType' in header"
            );
            return Ok((None, info));
        }
    };

    match image_type.pixels() {
        Some(PixelKind::Original) => {}
        Some(PixelKind::Derived) => {
            info!("Cannot compute scan coverage. 'ImageType' is DERIVED");
            return Ok((None, info));
        }
        _ => {
            error!(
                "Cannot determine if scan coverage should be computed. Header 'ImageType[0]' \
                 ({}) is not 'ORIGINAL' or 'DERIVED'",
                image_type.first().unwrap_or_default()
            );
            return Ok((None, info));
        }
    }

    let Some(coverage) = compute_scan_coverage(table) else {
        return Ok((None, info));
    };
    if coverage.coverage != 0.0 {
        info.scan_coverage = Some(coverage.coverage);
    }
    if coverage.max_z != 0.0 {
        info.max_slice_location = Some(coverage.max_z);
    }
    if coverage.min_z != 0.0 {
        info.min_slice_location = Some(coverage.min_z);
    }
    Ok((Some(coverage.coverage), info))
}

/// Anatomy implied by the scan coverage alone
///
/// Gaps (250 to 800 mm and the exact boundaries) yield nothing.
pub fn anatomy_from_scan_coverage(coverage: Option<f64>) -> Vec<Anatomy> {
    let Some(coverage) = coverage else {
        return Vec::new();
    };
    if coverage < HEAD_MAX_COVERAGE_MM {
        vec![Anatomy::Head]
    } else if coverage > WHOLE_BODY_MIN_COVERAGE_MM {
        vec![Anatomy::WholeBody]
    } else if coverage > CAP_MIN_COVERAGE_MM && coverage < WHOLE_BODY_MIN_COVERAGE_MM {
        vec![Anatomy::Chest, Anatomy::Abdomen, Anatomy::Pelvis]
    } else {
        Vec::new()
    }
}
