use std::f64::consts::FRAC_PI_2;

use anyhow::{ensure, Result};

use crate::env::NumFormat;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointKind {
    Revolute,
    Prismatic,
}

/// One row of a standard Denavit-Hartenberg table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DhRow {
    pub kind: JointKind,
    pub d: f64,
    pub a: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RobotModel {
    pub name: String,
    pub manufacturer: String,
    dh: Vec<DhRow>,
}

impl RobotModel {
    pub fn new(name: &str, manufacturer: &str, dh: Vec<DhRow>) -> Result<Self> {
        ensure!(!dh.is_empty(), "robot model {}: empty DH table", name);

        for (i, row) in dh.iter().enumerate() {
            ensure!(
                row.d.is_finite() && row.a.is_finite() && row.alpha.is_finite(),
                "robot model {}: joint {} has a non-finite DH parameter",
                name,
                i + 1
            );
        }

        Ok(Self {
            name: name.to_string(),
            manufacturer: manufacturer.to_string(),
            dh,
        })
    }

    pub fn n(&self) -> usize {
        self.dh.len()
    }

    /// Joint structure string, e.g. "RRRRRR" for an all-revolute arm.
    pub fn structure(&self) -> String {
        self.dh
            .iter()
            .map(|row| match row.kind {
                JointKind::Revolute => 'R',
                JointKind::Prismatic => 'P',
            })
            .collect()
    }

    pub fn render(&self, format: &NumFormat) -> String {
        let mut out = format!(
            "{} ({}), {} axes ({})\n",
            self.name,
            self.manufacturer,
            self.n(),
            self.structure()
        );

        let w = format.width;
        out.push_str(&format!(
            "  j |{:>w$} |{:>w$} |{:>w$}\n",
            "d", "a", "alpha"
        ));

        for (i, row) in self.dh.iter().enumerate() {
            out.push_str(&format!(
                "{:>3} |{} |{} |{}\n",
                i + 1,
                format.num(row.d),
                format.num(row.a),
                format.num(row.alpha)
            ));
        }

        out
    }
}

fn revolute(d: f64, a: f64, alpha: f64) -> DhRow {
    DhRow {
        kind: JointKind::Revolute,
        d,
        a,
        alpha,
    }
}

/// 6-axis Unimation Puma 560, the classic lab arm.
pub fn puma560() -> Result<RobotModel> {
    RobotModel::new(
        "Puma 560",
        "Unimation",
        vec![
            revolute(0.6718, 0.0, FRAC_PI_2),
            revolute(0.0, 0.4318, 0.0),
            revolute(0.15005, 0.0203, -FRAC_PI_2),
            revolute(0.4318, 0.0, FRAC_PI_2),
            revolute(0.0, 0.0, -FRAC_PI_2),
            revolute(0.0, 0.0, 0.0),
        ],
    )
}

/// 7-axis Franka Emika Panda.
pub fn panda() -> Result<RobotModel> {
    RobotModel::new(
        "Panda",
        "Franka Emika",
        vec![
            revolute(0.333, 0.0, 0.0),
            revolute(0.0, 0.0, -FRAC_PI_2),
            revolute(0.316, 0.0, FRAC_PI_2),
            revolute(0.0, 0.0825, FRAC_PI_2),
            revolute(0.384, -0.0825, -FRAC_PI_2),
            revolute(0.0, 0.0, FRAC_PI_2),
            revolute(0.107, 0.088, FRAC_PI_2),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bundled_models() {
        let puma = puma560().unwrap();
        assert_eq!(puma.n(), 6);
        assert_eq!(puma.structure(), "RRRRRR");

        let panda = panda().unwrap();
        assert_eq!(panda.n(), 7);
        assert_eq!(panda.structure(), "RRRRRRR");
    }

    #[test]
    fn test_construction_rejects_bad_tables() {
        assert!(RobotModel::new("empty", "nobody", vec![]).is_err());
        assert!(RobotModel::new("nan", "nobody", vec![revolute(f64::NAN, 0.0, 0.0)]).is_err());
    }

    #[test]
    fn test_render() {
        let model = RobotModel::new("Two Link", "Test", vec![
            revolute(0.0, 1.0, 0.0),
            revolute(0.0, 1.0, 0.0),
        ])
        .unwrap();

        let format = NumFormat::default();
        assert_eq!(
            model.render(&format),
            "Two Link (Test), 2 axes (RR)\n\
             \u{20} j |       d |       a |   alpha\n\
             \u{20} 1 |  0.0000 |  1.0000 |  0.0000\n\
             \u{20} 2 |  0.0000 |  1.0000 |  0.0000\n"
        );
    }
}
