//! `DemoEconomy`: the built-in two-country economy.
//!
//! Sixteen transform templates covering construction, manufacturing,
//! population, agriculture, energy and recycling, the default weight table,
//! and the Atlantis/Carpania starting holdings.

use mercator_kernel::state::agent::Agent;
use mercator_kernel::state::bag::ResourceBag;
use mercator_kernel::state::weights::ResourceWeights;
use mercator_kernel::state::world::WorldState;
use mercator_kernel::transform::catalog::{CatalogError, TemplateCatalog};
use mercator_kernel::transform::template::TransformTemplate;

use crate::contract::{EconomyWorldV1, WorldHarnessError};

fn template<const I: usize, const O: usize, const R: usize>(
    name: &str,
    inputs: [(&str, f64); I],
    outputs: [(&str, f64); O],
    required: [(&str, f64); R],
) -> TransformTemplate {
    TransformTemplate::new(
        name,
        ResourceBag::from(inputs),
        ResourceBag::from(outputs),
        ResourceBag::from(required),
    )
}

/// The sixteen built-in templates, in catalog order.
#[must_use]
pub fn templates() -> Vec<TransformTemplate> {
    vec![
        template(
            "Housing",
            [
                ("AvailableLand", 1.0),
                ("Water", 3.0),
                ("MetallicElements", 1.0),
                ("Timber", 4.0),
                ("MetallicAlloys", 3.0),
                ("PotentialEnergyUsable", 2.0),
            ],
            [("Housing", 3.0), ("HousingWaste", 2.0)],
            [("Population", 5.0)],
        ),
        template(
            "Alloys",
            [
                ("MetallicElements", 2.0),
                ("PotentialEnergyUsable", 2.0),
                ("Water", 2.0),
            ],
            [
                ("MetallicAlloys", 3.0),
                ("MetallicAlloysWaste", 1.0),
                ("Water", 1.0),
            ],
            [("Population", 1.0)],
        ),
        template(
            "Electronics",
            [
                ("MetallicElements", 2.0),
                ("MetallicAlloys", 1.0),
                ("PotentialEnergyUsable", 2.0),
                ("Water", 2.0),
            ],
            [("Electronics", 3.0), ("ElectronicsWaste", 1.0)],
            [("Population", 1.0)],
        ),
        template(
            "TrainSkilledLabor",
            [
                ("Population", 1.0),
                ("Education", 2.0),
                ("Water", 1.0),
                ("PotentialEnergyUsable", 2.0),
            ],
            [("SkilledLabor", 1.0)],
            [],
        ),
        template(
            "Birth",
            [("Food", 2.0), ("Water", 1.0)],
            [("Population", 1.0), ("FoodWaste", 0.5)],
            [("Population", 2.0)],
        ),
        template(
            "Farm",
            [
                ("AvailableLand", 2.0),
                ("Water", 5.0),
                ("PotentialEnergyUsable", 2.0),
            ],
            [("Food", 6.0)],
            [("Population", 2.0), ("SkilledLabor", 2.0)],
        ),
        template(
            "MineAlloys",
            [("PotentialEnergyUsable", 2.0), ("Water", 2.0)],
            [("MetallicAlloys", 3.0), ("MetallicAlloysWaste", 1.0)],
            [("SkilledLabor", 2.0), ("Factories", 1.0)],
        ),
        template(
            "ExtractWater",
            [("PotentialEnergyUsable", 4.0)],
            [("Water", 5.0)],
            [("Population", 1.0), ("SkilledLabor", 1.0)],
        ),
        template(
            "Lumber",
            [("AvailableLand", 1.0), ("PotentialEnergyUsable", 1.0)],
            [("Timber", 10.0)],
            [("Population", 1.0)],
        ),
        // Burning timber degrades land: a negative output.
        template(
            "BurnTimber",
            [("Timber", 5.0)],
            [("PotentialEnergyUsable", 2.0), ("AvailableLand", -0.2)],
            [("Population", 1.0), ("SkilledLabor", 1.0)],
        ),
        template(
            "SolarPower",
            [("Electronics", 1.0)],
            [("PotentialEnergyUsable", 1.0)],
            [("SkilledLabor", 1.0), ("AvailableLand", 1.0)],
        ),
        template(
            "HydroPower",
            [],
            [("PotentialEnergyUsable", 1.0)],
            [("Water", 5.0), ("Population", 2.0), ("Dam", 1.0)],
        ),
        template(
            "BuildDam",
            [
                ("Timber", 10.0),
                ("MetallicAlloys", 10.0),
                ("MetallicElements", 5.0),
                ("PotentialEnergyUsable", 10.0),
                ("AvailableLand", 3.0),
                ("Water", 5.0),
            ],
            [("Dam", 1.0), ("HousingWaste", 2.0)],
            [("SkilledLabor", 5.0)],
        ),
        template(
            "BuildFactory",
            [
                ("MetallicAlloys", 8.0),
                ("Timber", 8.0),
                ("PotentialEnergyUsable", 8.0),
            ],
            [("Factories", 1.0), ("HousingWaste", 1.0)],
            [("SkilledLabor", 2.0), ("Population", 5.0)],
        ),
        template(
            "RecycleElectronics",
            [("ElectronicsWaste", 3.0), ("PotentialEnergyUsable", 2.0)],
            [("MetallicAlloys", 1.0)],
            [("SkilledLabor", 1.0), ("Factories", 1.0)],
        ),
        template(
            "CompostFood",
            [("FoodWaste", 10.0)],
            [("FoodWaste", 8.0)],
            [("Population", 2.0)],
        ),
    ]
}

/// The built-in templates as a catalog.
///
/// # Errors
///
/// Returns [`CatalogError`] only if the built-in list is edited into an
/// invalid state.
pub fn catalog() -> Result<TemplateCatalog, CatalogError> {
    TemplateCatalog::new(templates())
}

/// The default weight table. Waste carries negative weight; population,
/// land, energy and labor are unweighted.
#[must_use]
pub fn default_weights() -> ResourceWeights {
    ResourceWeights::from([
        ("Housing", 3.0),
        ("HousingWaste", -2.0),
        ("Electronics", 4.0),
        ("ElectronicsWaste", -2.0),
        ("MetallicAlloys", 2.0),
        ("MetallicAlloysWaste", -1.5),
        ("Timber", 1.0),
        ("MetallicElements", 1.5),
        ("Food", 3.0),
        ("Water", 2.0),
        ("FoodWaste", -1.5),
    ])
}

/// Atlantis and Carpania.
///
/// The goods columns are the classic demo holdings. Land, energy, labor and
/// education are added so that every template family can fire.
#[must_use]
pub fn demo_world() -> WorldState {
    WorldState::new([
        Agent::new(
            "Atlantis",
            ResourceBag::from([
                ("Population", 100.0),
                ("Housing", 20.0),
                ("HousingWaste", 3.0),
                ("Electronics", 10.0),
                ("ElectronicsWaste", 1.0),
                ("MetallicAlloys", 15.0),
                ("MetallicAlloysWaste", 2.0),
                ("Timber", 40.0),
                ("MetallicElements", 30.0),
                ("Food", 60.0),
                ("Water", 80.0),
                ("FoodWaste", 4.0),
                ("AvailableLand", 20.0),
                ("PotentialEnergyUsable", 60.0),
                ("SkilledLabor", 6.0),
                ("Education", 10.0),
            ]),
        ),
        Agent::new(
            "Carpania",
            ResourceBag::from([
                ("Population", 80.0),
                ("Housing", 15.0),
                ("HousingWaste", 2.0),
                ("Electronics", 8.0),
                ("ElectronicsWaste", 1.0),
                ("MetallicAlloys", 3.0),
                ("MetallicAlloysWaste", 1.0),
                ("Timber", 20.0),
                ("MetallicElements", 15.0),
                ("Food", 40.0),
                ("Water", 60.0),
                ("FoodWaste", 3.0),
                ("AvailableLand", 12.0),
                ("PotentialEnergyUsable", 40.0),
                ("SkilledLabor", 3.0),
                ("Education", 6.0),
            ]),
        ),
    ])
}

/// The built-in economy as a runnable world.
pub struct DemoEconomy;

impl EconomyWorldV1 for DemoEconomy {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "economy_demo"
    }

    fn initial_world(&self) -> WorldState {
        demo_world()
    }

    fn weights(&self) -> ResourceWeights {
        default_weights()
    }

    fn catalog(&self) -> Result<TemplateCatalog, WorldHarnessError> {
        Ok(catalog()?)
    }
}
