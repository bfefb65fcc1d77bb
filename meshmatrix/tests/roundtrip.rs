use {
    meshmatrix::{
        GeneratorConfig, MatrixError, generate,
        models::{read_matrix, write_matrix},
    },
    rand::{SeedableRng, rngs::StdRng},
    std::fs,
};

#[test]
fn generated_matrix_survives_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("MeshChunkMatrix.txt");

    let config = GeneratorConfig {
        node_count: 10,
        symmetric: true,
        ..Default::default()
    };
    let matrix = generate(&config, &mut StdRng::seed_from_u64(42), || ()).unwrap();

    write_matrix(&matrix, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 10);
    assert!(text.lines().all(|l| l.split('\t').count() == 10));
    assert!(text.ends_with('\n'));

    let back = read_matrix(&path).unwrap();
    assert_eq!(back, matrix);
    assert!(back.is_symmetric());
    assert!(back.diagonal_is_zero());
}

#[test]
fn overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    fs::write(&path, "stale\tcontent\nmore\n").unwrap();

    let config = GeneratorConfig {
        node_count: 2,
        chunk_sizes: vec![3],
        sparsity: 0.0,
        ..Default::default()
    };
    let matrix = generate(&config, &mut StdRng::seed_from_u64(1), || ()).unwrap();
    write_matrix(&matrix, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "0\t3\n3\t0\n");
}

#[test]
fn missing_parent_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("out.txt");

    let matrix = meshmatrix::Matrix::zeros(3);
    let err = write_matrix(&matrix, &path).unwrap_err();
    assert!(matches!(err, MatrixError::Io { .. }));
    assert!(err.to_string().contains("out.txt"));
}

#[test]
fn missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        read_matrix(dir.path().join("absent.txt")),
        Err(MatrixError::Io { .. })
    ));
}

#[cfg(target_os = "linux")]
#[test]
fn failed_row_write_names_the_file() {
    // Larger than the writer's buffer so the failure hits mid-serialization.
    let config = GeneratorConfig {
        node_count: 200,
        chunk_sizes: vec![2048],
        sparsity: 0.0,
        ..Default::default()
    };
    let matrix = generate(&config, &mut StdRng::seed_from_u64(7), || ()).unwrap();

    let err = write_matrix(&matrix, "/dev/full").unwrap_err();
    assert!(matches!(err, MatrixError::Io { .. }));
    assert!(err.to_string().contains("/dev/full"));
}

#[test]
fn empty_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").unwrap();

    assert!(matches!(read_matrix(&path), Err(MatrixError::Empty)));
}
