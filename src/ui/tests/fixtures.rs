// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared fixtures: local stand-ins for the remote CSV sources

use std::fs;
use tempfile::TempDir;

use crate::config::DashboardConfig;

pub const AGRICULTURE_CSV: &str = "\
state,total exports,beef,pork
Alabama,1390.63,34.4,10.6
Alaska,13.31,0.2,0.1
Arizona,1463.17,71.3,17.9
Arkansas,3586.02,53.2,29.4
California,16472.88,228.7,11.1
Colorado,1851.33,261.4,66
Connecticut,259.62,1.1,0.1
Delaware,282.19,0.4,0.6
Florida,3764.09,42.6,0.9
Georgia,2860.84,31,18.9
Hawaii,401.84,4,0.7
Idaho,2078.89,119.8,0
";

pub const GDP_CSV: &str = "\
country,continent,gdp per capita,life expectancy,population
Norway,Europe,49357.19017,80.196,4627926
Chad,Africa,1704.063724,50.651,10238807
Japan,Asia,31656.06806,82.603,127467972
Canada,Americas,36319.23501,80.653,33390141
";

/// Writes both CSV files and returns a config pointing at them
pub fn local_config() -> (TempDir, DashboardConfig) {
    let temp_dir = TempDir::new().unwrap();
    let table = temp_dir.path().join("exports.csv");
    let bubble = temp_dir.path().join("gdp.csv");
    fs::write(&table, AGRICULTURE_CSV).unwrap();
    fs::write(&bubble, GDP_CSV).unwrap();

    let mut config = DashboardConfig::default();
    config.table.source = table.display().to_string();
    config.bubble_source = bubble.display().to_string();
    (temp_dir, config)
}
