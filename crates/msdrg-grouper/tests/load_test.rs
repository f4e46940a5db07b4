//! Load-time behaviour: mandatory appendices, tolerated MDC files

use std::fs;
use std::path::PathBuf;

use msdrg_core::Error;
use msdrg_grouper::{DrgGrouper, ReferenceStore};

const APPENDIX_A: &str = "\
DRG MDC MS Description
193 04  M  Simple Pneumonia and Pleurisy with MCC
194 04  M  Simple Pneumonia and Pleurisy with CC
195 04  M  Simple Pneumonia and Pleurisy without CC/MCC
";

const APPENDIX_B: &str = "\
I10 Dx  MDC DRG(s)      ICD-10-CM Description
J189    04  193-195     Pneumonia, unspecified organism
";

const APPENDIX_C: &str = "\
Part 1  List of CCs and MCCs
 I10 Dx  Lev PDX Exclusions   ICD-10-CM Description
 E1100   MCC 0015:4 codes     Type 2 diabetes mellitus with hyperosmolarity
Part 2  Diagnoses that act as a CC or MCC only when the patient is discharged alive
  I462    Cardiac arrest due to underlying cardiac condition
Part 3  PDX exclusions for specific MS-DRGs
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("msdrg-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn loads_a_complete_data_directory() {
    let dir = scratch_dir("load-ok");
    fs::write(dir.join("appendix_A.txt"), APPENDIX_A).unwrap();
    fs::write(dir.join("appendix_B.txt"), APPENDIX_B).unwrap();
    fs::write(dir.join("appendix_C.txt"), APPENDIX_C).unwrap();
    // no MDC logic files: tolerated, contributes nothing

    let store = ReferenceStore::load(&dir).unwrap();
    assert_eq!(store.drg_count(), 3);
    assert_eq!(store.diagnosis_count(), 1);
    assert_eq!(store.cc_mcc_count(), 1);
    assert_eq!(store.procedure_count(), 0);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn grouper_loads_and_groups_from_disk() {
    let dir = scratch_dir("load-group");
    fs::write(dir.join("appendix_A.txt"), APPENDIX_A).unwrap();
    fs::write(dir.join("appendix_B.txt"), APPENDIX_B).unwrap();
    fs::write(dir.join("appendix_C.txt"), APPENDIX_C).unwrap();

    let grouper = DrgGrouper::load(&dir).unwrap();
    let result = grouper.group(&msdrg_core::Encounter::new("J189").secondary_dx(["E1100"]));
    assert_eq!(result.drg, "193");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_appendix_a_is_fatal() {
    let dir = scratch_dir("load-missing-a");
    fs::write(dir.join("appendix_B.txt"), APPENDIX_B).unwrap();
    fs::write(dir.join("appendix_C.txt"), APPENDIX_C).unwrap();

    let err = ReferenceStore::load(&dir).unwrap_err();
    assert!(matches!(err, Error::MissingReferenceFile(_)));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_appendix_c_is_fatal() {
    let dir = scratch_dir("load-missing-c");
    fs::write(dir.join("appendix_A.txt"), APPENDIX_A).unwrap();
    fs::write(dir.join("appendix_B.txt"), APPENDIX_B).unwrap();

    let err = ReferenceStore::load(&dir).unwrap_err();
    assert!(matches!(err, Error::MissingReferenceFile(_)));

    fs::remove_dir_all(&dir).unwrap();
}
