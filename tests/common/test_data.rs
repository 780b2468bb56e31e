//! Test data generation utilities.
//!
//! Builds catalog files (CSV plus ESM collection JSON) and small NetCDF
//! files with known values for the integration tests.

#![allow(dead_code)]

use cmip6kit::CatalogRecord;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Value written where data is missing
pub const MISSING_VALUE: f32 = 1.0e20;

/// A `tas` record for a monthly ScenarioMIP/CMIP run
pub fn tas_record(
    scenario: &str,
    model: &str,
    institution: &str,
    member: &str,
    uri: &str,
) -> CatalogRecord {
    CatalogRecord {
        experiment_id: scenario.to_string(),
        variable_id: "tas".to_string(),
        frequency: "mon".to_string(),
        activity_id: if scenario.starts_with("ssp") {
            "ScenarioMIP".to_string()
        } else {
            "CMIP".to_string()
        },
        source_id: model.to_string(),
        member_id: member.to_string(),
        institution_id: institution.to_string(),
        table_id: "Amon".to_string(),
        long_name: "Near-Surface Air Temperature".to_string(),
        units: "K".to_string(),
        uri: uri.to_string(),
    }
}

/// Writes `records` as `<dir>/catalog.csv` with the asset column named
/// `path`, plus an ESM collection `<dir>/catalog.json` pointing at it.
///
/// Returns the path of the JSON file.
pub fn write_esm_collection(dir: &Path, records: &[CatalogRecord]) -> std::io::Result<PathBuf> {
    let csv_path = dir.join("catalog.csv");
    let mut csv = std::fs::File::create(&csv_path)?;
    writeln!(
        csv,
        "activity_id,institution_id,source_id,experiment_id,member_id,table_id,variable_id,frequency,long_name,units,path"
    )?;
    for r in records {
        writeln!(
            csv,
            "{},{},{},{},{},{},{},{},{},{},{}",
            r.activity_id,
            r.institution_id,
            r.source_id,
            r.experiment_id,
            r.member_id,
            r.table_id,
            r.variable_id,
            r.frequency,
            r.long_name,
            r.units,
            r.uri
        )?;
    }

    let json_path = dir.join("catalog.json");
    std::fs::write(
        &json_path,
        r#"{
  "esmcat_version": "0.1.0",
  "id": "test-cmip6",
  "description": "cmip6kit test catalog",
  "catalog_file": "catalog.csv",
  "attributes": [
    {"column_name": "activity_id"},
    {"column_name": "source_id"}
  ],
  "assets": {"column_name": "path", "format": "netcdf"}
}"#,
    )?;
    Ok(json_path)
}

/// Creates a NetCDF file with a `tas` variable on (time=2, lat=2, lon=3).
///
/// The first time step holds `first_step`; the second is filled with 500 K
/// so a mean over the wrong step is easy to spot. Values equal to
/// [`MISSING_VALUE`] are flagged through the `missing_value` attribute.
#[cfg(feature = "netcdf")]
pub fn create_tas_nc(path: &Path, first_step: [f32; 6]) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", 2)?;
    file.add_dimension("lat", 2)?;
    file.add_dimension("lon", 3)?;

    file.add_attribute("title", "cmip6kit test data")?;
    file.add_attribute("institution", "cmip6kit test suite")?;

    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", "days since 2015-01-01")?;
        time_var.put_values(&[15.5f64, 45.0], ..)?;
    }

    {
        let mut lat_var = file.add_variable::<f32>("lat", &["lat"])?;
        lat_var.put_attribute("units", "degrees_north")?;
        lat_var.put_values(&[-45.0f32, 45.0], ..)?;
    }

    {
        let mut lon_var = file.add_variable::<f32>("lon", &["lon"])?;
        lon_var.put_attribute("units", "degrees_east")?;
        lon_var.put_values(&[0.0f32, 120.0, 240.0], ..)?;
    }

    {
        let mut values: Vec<f32> = first_step.to_vec();
        values.extend([500.0f32; 6]);

        let mut tas_var = file.add_variable::<f32>("tas", &["time", "lat", "lon"])?;
        tas_var.put_attribute("units", "K")?;
        tas_var.put_attribute("long_name", "Near-Surface Air Temperature")?;
        tas_var.put_attribute("missing_value", MISSING_VALUE)?;
        tas_var.put_values(&values, ..)?;
    }

    Ok(())
}

/// Creates a `tas` file on (time=`steps`, lat=2, lon=3) where every value of
/// step `k` is `250 + k`.
#[cfg(feature = "netcdf")]
pub fn create_tas_series_nc(path: &Path, steps: usize) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", steps)?;
    file.add_dimension("lat", 2)?;
    file.add_dimension("lon", 3)?;

    let values: Vec<f32> = (0..steps)
        .flat_map(|step| std::iter::repeat(250.0 + step as f32).take(6))
        .collect();

    let mut tas_var = file.add_variable::<f32>("tas", &["time", "lat", "lon"])?;
    tas_var.put_attribute("units", "K")?;
    tas_var.put_values(&values, ..)?;

    Ok(())
}

/// Creates a packed `tas` file: `short` values with `scale_factor` 0.01,
/// `add_offset` 273.15 and `missing_value` -32767 on (time=2, lat=2, lon=3).
///
/// The first step unpacks to 273.15 + [1, 2, 3, 4, 5] with one missing cell.
#[cfg(feature = "netcdf")]
pub fn create_packed_tas_nc(path: &Path) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("time", 2)?;
    file.add_dimension("lat", 2)?;
    file.add_dimension("lon", 3)?;

    let values: [i16; 12] = [
        100, 200, 300, 400, 500, -32767, // first step
        9000, 9000, 9000, 9000, 9000, 9000,
    ];

    let mut tas_var = file.add_variable::<i16>("tas", &["time", "lat", "lon"])?;
    tas_var.put_attribute("units", "K")?;
    tas_var.put_attribute("scale_factor", 0.01f32)?;
    tas_var.put_attribute("add_offset", 273.15f32)?;
    tas_var.put_attribute("missing_value", -32767i16)?;
    tas_var.put_values(&values, ..)?;

    Ok(())
}
