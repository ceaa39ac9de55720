//! Per-step energy and cost accounting for one charging strategy.

use std::fmt;

use serde::Serialize;

/// Signed power at the grid connection (kW).
///
/// Positive = surplus exported, negative = deficit imported.
pub fn grid_power_kw(solar_kw: f64, charge_kw: f64) -> f64 {
    solar_kw - charge_kw
}

/// Tariffs in currency per kWh, all `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prices {
    /// Paid for every kWh exported to the grid.
    pub export_per_kwh: f64,
    /// Charged for every kWh of local solar that goes into the vehicle.
    pub local_solar_per_kwh: f64,
    /// Charged for every kWh imported from the grid.
    pub import_per_kwh: f64,
}

/// Accumulated energy and money for one strategy over a run.
///
/// Every field only ever grows while a run is in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StrategyTotals {
    /// Solar energy delivered to the vehicle (kWh).
    pub total_solar_energy_kwh: f64,
    /// Grid energy delivered to the vehicle (kWh).
    pub total_grid_energy_kwh: f64,
    /// All energy delivered to the vehicle (kWh).
    pub total_charged_kwh: f64,
    /// Surplus solar pushed to the grid (kWh).
    pub exported_energy_kwh: f64,
    pub solar_cost: f64,
    pub grid_cost: f64,
    pub export_earnings: f64,
}

impl StrategyTotals {
    /// Books one step of `energy_step_h` hours.
    ///
    /// Charging draws on solar first; any rate above the available solar is
    /// imported. Whatever solar is left over is exported.
    pub fn record(&mut self, solar_kw: f64, charge_kw: f64, prices: &Prices, energy_step_h: f64) {
        if charge_kw > 0.0 {
            let solar_used_kwh = charge_kw.min(solar_kw.max(0.0)) * energy_step_h;
            let grid_used_kwh = charge_kw * energy_step_h - solar_used_kwh;

            self.total_charged_kwh += charge_kw * energy_step_h;
            self.total_solar_energy_kwh += solar_used_kwh;
            self.solar_cost += solar_used_kwh * prices.local_solar_per_kwh;
            if grid_used_kwh > 0.0 {
                self.total_grid_energy_kwh += grid_used_kwh;
                self.grid_cost += grid_used_kwh * prices.import_per_kwh;
            }
        }

        let grid_kw = grid_power_kw(solar_kw, charge_kw);
        if grid_kw > 0.0 {
            let exported_kwh = grid_kw * energy_step_h;
            self.exported_energy_kwh += exported_kwh;
            self.export_earnings += exported_kwh * prices.export_per_kwh;
        }
    }

    /// `grid_cost + solar_cost - export_earnings`.
    pub fn total_cost(&self) -> f64 {
        self.grid_cost + self.solar_cost - self.export_earnings
    }

    /// Net cost per kWh charged, or 0.0 when nothing was charged.
    pub fn effective_cost_per_kwh(&self) -> f64 {
        if self.total_charged_kwh > 0.0 {
            self.total_cost() / self.total_charged_kwh
        } else {
            0.0
        }
    }

    /// Share of charged energy that came from solar, in `[0, 1]`.
    pub fn solar_share(&self) -> f64 {
        if self.total_charged_kwh > 0.0 {
            self.total_solar_energy_kwh / self.total_charged_kwh
        } else {
            0.0
        }
    }
}

impl fmt::Display for StrategyTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solar energy used:     {:.2} kWh", self.total_solar_energy_kwh)?;
        writeln!(f, "Grid energy used:      {:.2} kWh", self.total_grid_energy_kwh)?;
        writeln!(f, "Solar exported:        {:.2} kWh", self.exported_energy_kwh)?;
        writeln!(f, "Total charged:         {:.2} kWh", self.total_charged_kwh)?;
        writeln!(f, "Solar cost:            {:.2}", self.solar_cost)?;
        writeln!(f, "Grid cost:             {:.2}", self.grid_cost)?;
        writeln!(f, "Export earnings:       {:.2}", self.export_earnings)?;
        writeln!(f, "Total cost:            {:.2}", self.total_cost())?;
        write!(f, "Effective cost:        {:.3} /kWh", self.effective_cost_per_kwh())
    }
}
