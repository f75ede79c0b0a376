use std::sync::Arc;

use nalgebra::{DMatrix, DVector};
use proptest::prelude::*;

use super::{EconomicModel, EnvironmentalModel, IndicatorGroups};

/// Two-sector economy with hand-derivable inverses (`det(I − A) = 0.69`).
pub(crate) fn toy_economy() -> EconomicModel {
    EconomicModel::new(
        DMatrix::from_row_slice(2, 2, &[10.0, 20.0, 30.0, 40.0]),
        DVector::from_vec(vec![100.0, 200.0]),
    )
    .expect("toy economy is valid")
}

/// Two indicators over the toy economy, both greenhouse gases.
pub(crate) fn toy_environment() -> Arc<EnvironmentalModel> {
    let pressures = DMatrix::from_row_slice(2, 2, &[50.0, 100.0, 10.0, 20.0]);
    let groups = IndicatorGroups::new().with("ghg", [0, 1]);

    Arc::new(
        EnvironmentalModel::new(Arc::new(toy_economy()), pressures, groups)
            .expect("toy environment is valid"),
    )
}

pub(crate) fn three_sector_economy() -> EconomicModel {
    EconomicModel::new(
        DMatrix::from_row_slice(
            3,
            3,
            &[10.0, 20.0, 15.0, 30.0, 40.0, 25.0, 20.0, 30.0, 35.0],
        ),
        DVector::from_vec(vec![100.0, 200.0, 150.0]),
    )
    .expect("three-sector economy is valid")
}

/// Seven indicators: rows 0..3 are greenhouse gases, rows 3..7 other pressures.
pub(crate) fn three_sector_environment() -> Arc<EnvironmentalModel> {
    #[rustfmt::skip]
    let pressures = DMatrix::from_row_slice(7, 3, &[
        50.0, 100.0, 75.0,
        10.0, 20.0, 15.0,
        5.0, 10.0, 7.5,
        200.0, 50.0, 80.0,
        3.0, 1.0, 2.0,
        0.0, 4.0, 6.0,
        12.0, 0.0, 9.0,
    ]);
    let groups = IndicatorGroups::new()
        .with("ghg", [0, 1, 2])
        .with("other", [3, 4, 5, 6]);

    Arc::new(
        EnvironmentalModel::new(Arc::new(three_sector_economy()), pressures, groups)
            .expect("three-sector environment is valid"),
    )
}

/// Random productive economies with strictly positive pressures.
///
/// Gross output exceeds both the row and the column sum of `Z` by a positive
/// margin, so `I − A` and `I − B` are both invertible.
pub(crate) fn arb_environment() -> impl Strategy<Value = Arc<EnvironmentalModel>> {
    (1_usize..=6, 1_usize..=4)
        .prop_flat_map(|(n, m)| {
            (
                Just(n),
                Just(m),
                prop::collection::vec(0.0..50.0_f64, n * n),
                prop::collection::vec(1.0..100.0_f64, n),
                prop::collection::vec(0.1..500.0_f64, m * n),
            )
        })
        .prop_map(|(n, m, flows, margins, pressures)| {
            let z = DMatrix::from_row_slice(n, n, &flows);
            let x = DVector::from_fn(n, |i, _| {
                z.row(i).sum().max(z.column(i).sum()) + margins[i]
            });
            let d1 = DMatrix::from_row_slice(m, n, &pressures);
            let groups = IndicatorGroups::new().with("all", 0..m);

            let economy = EconomicModel::new(z, x).expect("generated economy is valid");
            Arc::new(
                EnvironmentalModel::new(Arc::new(economy), d1, groups)
                    .expect("generated environment is valid"),
            )
        })
}
