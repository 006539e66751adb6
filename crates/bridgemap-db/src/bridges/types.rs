//! Row types for the `bridge_core` and `bridge_details` tables.
//!
//! Field names mirror the NBI-derived column names so `sqlx::FromRow`
//! maps them without renames.

use bridgemap_core::BridgeRecord;
use serde::Serialize;

/// Summary columns of a `bridge_core` row, as returned by every map query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BridgeCoreRow {
    pub structure_number_008: String,
    pub state_code_001: Option<String>,
    pub lat_016: Option<f64>,
    pub long_017: Option<f64>,
    pub year_built_027: Option<i32>,
    pub adt_029: Option<i32>,
    pub deck_cond_058: Option<String>,
    pub superstructure_cond_059: Option<String>,
    pub substructure_cond_060: Option<String>,
    pub channel_cond_061: Option<String>,
    pub culvert_cond_062: Option<String>,
    pub year_reconstructed_106: Option<i32>,
    pub bridge_condition: Option<String>,
    pub lowest_rating: Option<i32>,
    pub deck_area: Option<f64>,
}

impl From<BridgeCoreRow> for BridgeRecord {
    fn from(row: BridgeCoreRow) -> Self {
        Self {
            structure_number: row.structure_number_008,
            state_code: row.state_code_001,
            latitude: row.lat_016,
            longitude: row.long_017,
            year_built: row.year_built_027,
            average_daily_traffic: row.adt_029,
            deck_condition: row.deck_cond_058,
            superstructure_condition: row.superstructure_cond_059,
            substructure_condition: row.substructure_cond_060,
            channel_condition: row.channel_cond_061,
            culvert_condition: row.culvert_cond_062,
            year_reconstructed: row.year_reconstructed_106,
            bridge_condition: row.bridge_condition,
            lowest_rating: row.lowest_rating,
            deck_area: row.deck_area,
        }
    }
}

/// A per-tile ranked row. `tile_index` is the zero-based position of the
/// tile in the bound envelope arrays.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TileBridgeRow {
    pub tile_index: i64,
    #[sqlx(flatten)]
    pub bridge: BridgeCoreRow,
}

/// Full `bridge_details` row for the detail endpoint. Serialized as-is, so
/// clients see the NBI column names.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BridgeDetailRow {
    pub structure_number_008: String,

    pub features_desc_006a: Option<String>,
    pub critical_facility_006b: Option<String>,
    pub facility_carried_007: Option<String>,

    pub min_vert_clr_010: Option<f64>,
    pub kilometerpoint_011: Option<f64>,
    pub base_hwy_network_012: Option<String>,
    pub lrs_inv_route_013a: Option<String>,
    pub subroute_no_013b: Option<String>,
    pub route_number_005d: Option<String>,
    pub direction_005e: Option<String>,
    pub highway_district_002: Option<String>,
    pub county_code_003: Option<String>,
    pub place_code_004: Option<String>,

    pub detour_kilos_019: Option<i32>,
    pub toll_020: Option<String>,

    pub year_adt_030: Option<i32>,
    pub appr_width_mt_032: Option<f64>,
    pub median_code_033: Option<String>,
    pub degrees_skew_034: Option<i32>,

    pub structure_flared_035: Option<String>,
    pub railings_036a: Option<String>,
    pub transitions_036b: Option<String>,
    pub appr_rail_036c: Option<String>,
    pub appr_rail_end_036d: Option<String>,

    pub history_037: Option<String>,
    pub navigation_038: Option<String>,
    pub nav_vert_clr_mt_039: Option<f64>,
    pub nav_horr_clr_mt_040: Option<f64>,

    pub open_closed_posted_041: Option<String>,
    pub service_on_042a: Option<String>,
    pub service_und_042b: Option<String>,

    pub operating_rating_064: Option<f64>,
    pub opr_rating_meth_063: Option<String>,
    pub inventory_rating_066: Option<f64>,
    pub inv_rating_meth_065: Option<String>,

    pub structural_eval_067: Option<String>,
    pub deck_geometry_eval_068: Option<String>,
    pub undclrenc_eval_069: Option<String>,
    pub posting_eval_070: Option<String>,
    pub waterway_eval_071: Option<String>,
    pub appr_road_eval_072: Option<String>,

    pub work_proposed_075a: Option<String>,
    pub work_done_by_075b: Option<String>,
    pub imp_len_mt_076: Option<f64>,

    pub date_of_inspect_090: Option<String>,
    pub inspect_freq_months_091: Option<String>,
    pub fracture_092a: Option<String>,
    pub undwater_look_see_092b: Option<String>,
    pub spec_inspect_092c: Option<String>,
    pub fracture_last_date_093a: Option<String>,
    pub undwater_last_date_093b: Option<String>,
    pub spec_last_date_093c: Option<String>,

    pub bridge_imp_cost_094: Option<i32>,
    pub roadway_imp_cost_095: Option<i32>,
    pub total_imp_cost_096: Option<i32>,
    pub year_of_imp_097: Option<i32>,

    pub other_state_code_098a: Option<String>,
    pub other_state_pcnt_098b: Option<String>,
    pub othr_state_struc_no_099: Option<String>,
    pub parallel_structure_101: Option<String>,

    pub temp_structure_103: Option<String>,
    pub deck_structure_type_107: Option<String>,
    pub surface_type_108a: Option<String>,
    pub membrane_type_108b: Option<String>,
    pub deck_protection_108c: Option<String>,

    pub percent_adt_truck_109: Option<i32>,
    pub national_network_110: Option<String>,
    pub pier_protection_111: Option<String>,
    pub bridge_len_ind_112: Option<String>,
    pub scour_critical_113: Option<String>,

    pub future_adt_114: Option<i32>,
    pub year_of_future_adt_115: Option<i32>,
    pub min_nav_clr_mt_116: Option<f64>,

    pub strahnet_highway_100: Option<String>,
    pub traffic_direction_102: Option<String>,
    pub highway_system_104: Option<String>,
    pub federal_lands_105: Option<String>,
    pub fed_agency: Option<String>,
    pub submitted_by: Option<String>,
}
