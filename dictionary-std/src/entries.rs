//! A representative slice of the standard DICOM data element dictionary
//! (DICOM PS3.6), covering the file meta group and the attributes most
//! commonly seen in composite image instances.
//!
//! This is not the full ~4000-entry standard table; it is large enough to
//! resolve the attributes that matter for everyday reading, writing and
//! querying of a DICOM object, plus the canonical entries the fallback
//! rules in [`crate::StandardDataDictionary`] key off of. Private and
//! vendor tags are never in scope; callers needing them register their
//! own entries through a custom [`dicom_core::DataDictionary`]
//! implementation.

use dicom_core::{Tag, VR};

/// A single dictionary record as laid out in the generated table.
pub struct Entry {
    pub tag: Tag,
    pub name: &'static str,
    pub vr: VR,
}

macro_rules! entries {
    ($( ($g:expr, $e:expr, $name:expr, $vr:ident) ),* $(,)?) => {
        pub static ENTRIES: &[Entry] = &[
            $( Entry { tag: Tag($g, $e), name: $name, vr: VR::$vr } ),*
        ];
    };
}

entries! {
    // File Meta group (always Explicit VR Little Endian)
    (0x0002, 0x0001, "FileMetaInformationVersion", OB),
    (0x0002, 0x0002, "MediaStorageSOPClassUID", UI),
    (0x0002, 0x0003, "MediaStorageSOPInstanceUID", UI),
    (0x0002, 0x0010, "TransferSyntaxUID", UI),
    (0x0002, 0x0012, "ImplementationClassUID", UI),
    (0x0002, 0x0013, "ImplementationVersionName", SH),
    (0x0002, 0x0016, "SourceApplicationEntityTitle", AE),
    (0x0002, 0x0017, "SendingApplicationEntityTitle", AE),
    (0x0002, 0x0018, "ReceivingApplicationEntityTitle", AE),
    (0x0002, 0x0100, "PrivateInformationCreatorUID", UI),
    (0x0002, 0x0102, "PrivateInformation", OB),

    // Patient
    (0x0010, 0x0010, "PatientName", PN),
    (0x0010, 0x0020, "PatientID", LO),
    (0x0010, 0x0021, "IssuerOfPatientID", LO),
    (0x0010, 0x0030, "PatientBirthDate", DA),
    (0x0010, 0x0032, "PatientBirthTime", TM),
    (0x0010, 0x0040, "PatientSex", CS),
    (0x0010, 0x1010, "PatientAge", AS),
    (0x0010, 0x1020, "PatientSize", DS),
    (0x0010, 0x1030, "PatientWeight", DS),
    (0x0010, 0x2160, "EthnicGroup", SH),
    (0x0010, 0x4000, "PatientComments", LT),

    // General Study
    (0x0008, 0x0020, "StudyDate", DA),
    (0x0008, 0x0021, "SeriesDate", DA),
    (0x0008, 0x0022, "AcquisitionDate", DA),
    (0x0008, 0x0023, "ContentDate", DA),
    (0x0008, 0x0030, "StudyTime", TM),
    (0x0008, 0x0031, "SeriesTime", TM),
    (0x0008, 0x0032, "AcquisitionTime", TM),
    (0x0008, 0x0033, "ContentTime", TM),
    (0x0008, 0x0050, "AccessionNumber", SH),
    (0x0008, 0x0060, "Modality", CS),
    (0x0008, 0x0064, "ConversionType", CS),
    (0x0008, 0x0070, "Manufacturer", LO),
    (0x0008, 0x0080, "InstitutionName", LO),
    (0x0008, 0x0090, "ReferringPhysicianName", PN),
    (0x0008, 0x1010, "StationName", SH),
    (0x0008, 0x1030, "StudyDescription", LO),
    (0x0008, 0x103E, "SeriesDescription", LO),
    (0x0008, 0x1040, "InstitutionalDepartmentName", LO),
    (0x0008, 0x1050, "PerformingPhysicianName", PN),
    (0x0008, 0x1090, "ManufacturerModelName", LO),
    (0x0008, 0x0016, "SOPClassUID", UI),
    (0x0008, 0x0018, "SOPInstanceUID", UI),
    (0x0008, 0x0005, "SpecificCharacterSet", CS),
    (0x0008, 0x0008, "ImageType", CS),
    (0x0008, 0x0012, "InstanceCreationDate", DA),
    (0x0008, 0x0013, "InstanceCreationTime", TM),
    (0x0008, 0x0100, "CodeValue", SH),
    (0x0008, 0x0102, "CodingSchemeDesignator", SH),
    (0x0008, 0x0104, "CodeMeaning", LO),

    // Study/Series/Frame of Reference identifiers
    (0x0020, 0x000D, "StudyInstanceUID", UI),
    (0x0020, 0x000E, "SeriesInstanceUID", UI),
    (0x0020, 0x0010, "StudyID", SH),
    (0x0020, 0x0011, "SeriesNumber", IS),
    (0x0020, 0x0012, "AcquisitionNumber", IS),
    (0x0020, 0x0013, "InstanceNumber", IS),
    (0x0020, 0x0020, "PatientOrientation", CS),
    (0x0020, 0x0032, "ImagePositionPatient", DS),
    (0x0020, 0x0037, "ImageOrientationPatient", DS),
    (0x0020, 0x0052, "FrameOfReferenceUID", UI),
    (0x0020, 0x1040, "PositionReferenceIndicator", LO),
    (0x0020, 0x1041, "SliceLocation", DS),

    // General Equipment / Acquisition
    (0x0018, 0x0010, "ContrastBolusAgent", LO),
    (0x0018, 0x0015, "BodyPartExamined", CS),
    (0x0018, 0x0020, "ScanningSequence", CS),
    (0x0018, 0x0021, "SequenceVariant", CS),
    (0x0018, 0x0022, "ScanOptions", CS),
    (0x0018, 0x0023, "MRAcquisitionType", CS),
    (0x0018, 0x0025, "AngioFlag", CS),
    (0x0018, 0x0050, "SliceThickness", DS),
    (0x0018, 0x0060, "KVP", DS),
    (0x0018, 0x0080, "RepetitionTime", DS),
    (0x0018, 0x0081, "EchoTime", DS),
    (0x0018, 0x0083, "NumberOfAverages", DS),
    (0x0018, 0x0084, "ImagingFrequency", DS),
    (0x0018, 0x0085, "ImagedNucleus", SH),
    (0x0018, 0x0087, "MagneticFieldStrength", DS),
    (0x0018, 0x0088, "SpacingBetweenSlices", DS),
    (0x0018, 0x0091, "EchoTrainLength", IS),
    (0x0018, 0x1000, "DeviceSerialNumber", LO),
    (0x0018, 0x1020, "SoftwareVersions", LO),
    (0x0018, 0x1030, "ProtocolName", LO),
    (0x0018, 0x1100, "ReconstructionDiameter", DS),
    (0x0018, 0x1150, "ExposureTime", IS),
    (0x0018, 0x1151, "XRayTubeCurrent", IS),
    (0x0018, 0x1152, "Exposure", IS),
    (0x0018, 0x1164, "ImagerPixelSpacing", DS),
    (0x0018, 0x1310, "AcquisitionMatrix", US),
    (0x0018, 0x1312, "InPlanePhaseEncodingDirection", CS),
    (0x0018, 0x1314, "FlipAngle", DS),
    (0x0018, 0x1316, "SAR", DS),
    (0x0018, 0x5100, "PatientPosition", CS),

    // Image Pixel module
    (0x0028, 0x0002, "SamplesPerPixel", US),
    (0x0028, 0x0004, "PhotometricInterpretation", CS),
    (0x0028, 0x0006, "PlanarConfiguration", US),
    (0x0028, 0x0008, "NumberOfFrames", IS),
    (0x0028, 0x0010, "Rows", US),
    (0x0028, 0x0011, "Columns", US),
    (0x0028, 0x0030, "PixelSpacing", DS),
    (0x0028, 0x0034, "PixelAspectRatio", IS),
    (0x0028, 0x0100, "BitsAllocated", US),
    (0x0028, 0x0101, "BitsStored", US),
    (0x0028, 0x0102, "HighBit", US),
    (0x0028, 0x0103, "PixelRepresentation", US),
    (0x0028, 0x0106, "SmallestImagePixelValue", US),
    (0x0028, 0x0107, "LargestImagePixelValue", US),
    (0x0028, 0x1050, "WindowCenter", DS),
    (0x0028, 0x1051, "WindowWidth", DS),
    (0x0028, 0x1052, "RescaleIntercept", DS),
    (0x0028, 0x1053, "RescaleSlope", DS),
    (0x0028, 0x1054, "RescaleType", LO),
    (0x0028, 0x2110, "LossyImageCompression", CS),

    // Pixel Data and related
    (0x7FE0, 0x0010, "PixelData", OW),

    // SR / Content Sequences (a few, to exercise SQ handling in tests)
    (0x0040, 0xA730, "ContentSequence", SQ),
    (0x0040, 0xA168, "ConceptCodeSequence", SQ),
    (0x0008, 0x1140, "ReferencedImageSequence", SQ),
    (0x0008, 0x1150, "ReferencedSOPClassUID", UI),
    (0x0008, 0x1155, "ReferencedSOPInstanceUID", UI),
    (0x0054, 0x0016, "RadiopharmaceuticalInformationSequence", SQ),

    // DICOMDIR-adjacent / directory record (kept for completeness of the
    // attribute surface, not for DICOMDIR file parsing itself)
    (0x0004, 0x1220, "DirectoryRecordSequence", SQ),

    // Canonical entries for the dictionary's repeating-tag fallbacks.
    // Source Image IDs, retired, repeats over (0020,31xx).
    (0x0020, 0x3100, "SourceImageIDs", CS),
    // Overlay Data repeats over (60xx,3000).
    (0x6000, 0x3000, "OverlayData", OW),
    // Curve Data repeats over (50xx,3000), retired.
    (0x5000, 0x3000, "CurveData", OW),
}
