//! Decoding of the `.sso` orbit dataset.
//!
//! * [`fixed_str`] – fixed-width text fields, kept byte for byte.
//! * [`orbit_kind`] – orbit categories and the thresholds derived from them.
//! * [`orbit_record`] – one record and its variable binary layout.
//! * [`sso_reader`] – header handling and the record stream.
//! * [`orbit_store`] – major bodies kept as reference frames for satellites.
pub mod fixed_str;
pub mod orbit_kind;
pub mod orbit_record;
pub mod orbit_store;
pub mod sso_reader;
