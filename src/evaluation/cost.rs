//! Cost model parameters.

use crate::error::{Error, Result};

/// Fitness assigned to a genome whose total cost is exactly zero.
pub const BEST_FITNESS: f64 = f64::MAX;

/// How shared corridors are charged to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeCharging {
    /// A corridor is paid for once per genome, however many routes use it.
    #[default]
    Once,
    /// A corridor is paid for once per route that runs along it.
    PerRoute,
}

/// Constants of the two-term cost function.
///
/// Defaults are tuned so that operator cost weighs an order of magnitude
/// more than commuter time, which keeps "cover every street" genomes from
/// winning.
///
/// ```
/// use u_transit::evaluation::CostModel;
///
/// let costs = CostModel::default().with_bus_speed_multiplier(0.5);
/// assert!(costs.validate().is_ok());
/// assert_eq!(costs.total_cost(2.0, 3.0), 2.0 * 10.0 + 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    /// Factor applied to travel time on bus-served streets, in `(0, 1)`.
    pub bus_speed_multiplier: f64,

    /// Operator cost per minute of served street.
    pub operator_cost_per_minute: f64,

    /// Cost per trip that cannot reach its destination.
    pub unserved_penalty: f64,

    /// Operator cost of a hop between two nodes with no street between them.
    pub teleport_penalty: f64,

    /// Weight of operator cost in the total.
    pub operator_weight: f64,

    /// Weight of commuter cost in the total.
    pub user_weight: f64,

    /// Numerator of the cost-to-fitness inversion.
    pub fitness_scale: f64,

    /// Charging policy for corridors shared by several routes.
    pub edge_charging: EdgeCharging,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            bus_speed_multiplier: 0.2,
            operator_cost_per_minute: 1.0,
            unserved_penalty: 1000.0,
            teleport_penalty: 50.0,
            operator_weight: 10.0,
            user_weight: 1.0,
            fitness_scale: 1e9,
            edge_charging: EdgeCharging::Once,
        }
    }
}

impl CostModel {
    pub fn with_bus_speed_multiplier(mut self, m: f64) -> Self {
        self.bus_speed_multiplier = m;
        self
    }

    pub fn with_operator_cost_per_minute(mut self, c: f64) -> Self {
        self.operator_cost_per_minute = c;
        self
    }

    pub fn with_unserved_penalty(mut self, p: f64) -> Self {
        self.unserved_penalty = p;
        self
    }

    pub fn with_teleport_penalty(mut self, p: f64) -> Self {
        self.teleport_penalty = p;
        self
    }

    /// Sets the operator and user weights of the total cost.
    pub fn with_weights(mut self, operator_weight: f64, user_weight: f64) -> Self {
        self.operator_weight = operator_weight;
        self.user_weight = user_weight;
        self
    }

    pub fn with_fitness_scale(mut self, scale: f64) -> Self {
        self.fitness_scale = scale;
        self
    }

    pub fn with_edge_charging(mut self, charging: EdgeCharging) -> Self {
        self.edge_charging = charging;
        self
    }

    /// Weighted sum of the two cost terms.
    pub fn total_cost(&self, operator_cost: f64, user_cost: f64) -> f64 {
        operator_cost * self.operator_weight + user_cost * self.user_weight
    }

    /// Inverts a total cost into a fitness where higher is better.
    ///
    /// Zero cost maps to [`BEST_FITNESS`]; infinite cost maps to zero.
    pub fn fitness(&self, total_cost: f64) -> f64 {
        if total_cost == 0.0 {
            BEST_FITNESS
        } else {
            self.fitness_scale / total_cost
        }
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<()> {
        let m = self.bus_speed_multiplier;
        if !(m > 0.0 && m < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "bus_speed_multiplier must be in (0, 1), got {m}"
            )));
        }
        for (name, value) in [
            ("operator_cost_per_minute", self.operator_cost_per_minute),
            ("unserved_penalty", self.unserved_penalty),
            ("teleport_penalty", self.teleport_penalty),
            ("operator_weight", self.operator_weight),
            ("user_weight", self.user_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !self.fitness_scale.is_finite() || self.fitness_scale <= 0.0 {
            return Err(Error::InvalidConfig(
                "fitness_scale must be finite and positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let c = CostModel::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.edge_charging, EdgeCharging::Once);
        assert!((c.bus_speed_multiplier - 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_multiplier_range() {
        assert!(CostModel::default()
            .with_bus_speed_multiplier(1.0)
            .validate()
            .is_err());
        assert!(CostModel::default()
            .with_bus_speed_multiplier(0.0)
            .validate()
            .is_err());
        assert!(CostModel::default()
            .with_bus_speed_multiplier(0.99)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let c = CostModel::default().with_unserved_penalty(-1.0);
        assert!(matches!(c.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_fitness_inversion() {
        let c = CostModel::default().with_fitness_scale(100.0);
        assert_eq!(c.fitness(4.0), 25.0);
        assert_eq!(c.fitness(0.0), BEST_FITNESS);
        assert_eq!(c.fitness(f64::INFINITY), 0.0);
        assert!(c.fitness(1.0) > c.fitness(2.0));
    }
}
