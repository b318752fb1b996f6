//! End-to-end tests through the NetCDF layer: load labeled arrays from a
//! file, compute an anomaly, and round-trip the result back through disk.

use chrono::{NaiveDate, Timelike};
use grid_clim::anomaly::{compute_anomaly, GroupKey, ReduceMode};
use grid_clim::grid::Coord;
use grid_clim::netcdf_io::{read_data_array, DataArrayWriter};
use ndarray::Array3;
use netcdf::{create, open};
use tempfile::tempdir;

#[test]
fn test_netcdf_read_anomaly_write_roundtrip() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input_path = temp_dir.path().join("input.nc");
    let output_path = temp_dir.path().join("anomaly.nc");

    // Four monthly time steps (mid Jan..Apr 2000) on a 3x2 grid
    let time_values = [15.0f64, 46.0, 75.0, 106.0]; // days since 2000-01-01
    let y_values = [10.0f64, 20.0, 30.0];
    let x_values = [100.0f64, 110.0];
    let test_data: Vec<f32> = (0..24).map(|i| i as f32).collect();

    {
        let mut file = create(&input_path).expect("Failed to create NetCDF file");

        file.add_dimension("time", 4).expect("Failed to add dimension time");
        file.add_dimension("y", 3).expect("Failed to add dimension y");
        file.add_dimension("x", 2).expect("Failed to add dimension x");

        let mut tvar = file
            .add_variable::<f64>("time", &["time"])
            .expect("Failed to add time variable");
        tvar.put_attribute("units", "days since 2000-01-01")
            .expect("Failed to set time units");
        tvar.put_values(&time_values, ..)
            .expect("Failed to write time values");

        let mut yvar = file
            .add_variable::<f64>("y", &["y"])
            .expect("Failed to add y variable");
        yvar.put_values(&y_values, ..).expect("Failed to write y values");

        let mut xvar = file
            .add_variable::<f64>("x", &["x"])
            .expect("Failed to add x variable");
        xvar.put_values(&x_values, ..).expect("Failed to write x values");

        let mut var = file
            .add_variable::<f32>("temperature", &["time", "y", "x"])
            .expect("Failed to add variable");
        let data_array = Array3::from_shape_vec((4, 3, 2), test_data.clone())
            .expect("Failed to create array from test data");
        var.put(data_array.view(), ..).expect("Failed to write data");
    }

    // Load the labeled array, CF time decoded
    let file = open(&input_path).expect("Failed to open NetCDF file");
    let data = read_data_array(&file, "temperature").expect("Failed to read data array");

    assert_eq!(data.dims(), &["time", "y", "x"]);
    assert_eq!(data.shape(), &[4, 3, 2]);
    assert_eq!(data.numeric_coord("y").unwrap(), &y_values);
    assert_eq!(data.numeric_coord("x").unwrap(), &x_values);

    let times = data.time_coord("time").unwrap();
    assert_eq!(
        times[0].date(),
        NaiveDate::from_ymd_opt(2000, 1, 16).unwrap()
    );
    assert_eq!(times[0].hour(), 0);
    assert_eq!(
        times[3].date(),
        NaiveDate::from_ymd_opt(2000, 4, 16).unwrap()
    );

    // Anomaly of the data against itself: with one time step per month the
    // baseline equals the slice, so the anomaly is exactly zero
    let anom = compute_anomaly(&data, &data, GroupKey::Month, ReduceMode::Mean)
        .expect("Failed to compute anomaly");
    assert_eq!(anom.dims(), data.dims());
    assert!(anom.data().iter().all(|&v| v.abs() < 1e-6));

    // Round-trip the anomaly through disk
    DataArrayWriter::new(&output_path)
        .write(&anom)
        .expect("Failed to write anomaly");

    let out_file = open(&output_path).expect("Failed to open output file");
    let read_back =
        read_data_array(&out_file, anom.name()).expect("Failed to read anomaly back");

    assert_eq!(read_back.dims(), anom.dims());
    assert_eq!(read_back.shape(), anom.shape());
    assert_eq!(read_back.numeric_coord("y").unwrap(), &y_values);
    assert_eq!(read_back.numeric_coord("x").unwrap(), &x_values);

    // Timestamps survive the re-encoding to hours since 1970-01-01
    match read_back.coord("time") {
        Some(Coord::Time(read_times)) => assert_eq!(read_times.as_slice(), times),
        other => panic!("Expected decoded time coordinate, got {:?}", other),
    }

    for (a, b) in read_back.data().iter().zip(anom.data().iter()) {
        assert_eq!(a, b);
    }

    println!("✅ Integration test passed: NetCDF read, anomaly, and write round-trip");
}
