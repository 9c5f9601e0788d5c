//! Column layouts of the two export generations.
//!
//! Exports carry no usable schema, so each generation is described here as a
//! table of named columns. A future revision of the mobile tool gets a new
//! table rather than new indexing code in the parsers.

/// Columns of the row that carries project-level information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectColumns {
    pub project_number: usize,
    pub work_location: usize,
    pub report_date: usize,
    pub report_number: usize,
    pub employee_id: usize,
    pub employee_name: usize,
    pub trade: usize,
    pub concern_id: Option<usize>,
    pub project_name: Option<usize>,
}

/// Columns shared by work-line rows of every layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumns {
    /// Rows with fewer fields are dropped.
    pub min_fields: usize,
    pub line_number: usize,
    pub component: usize,
    pub work_done: usize,
    pub quantity: usize,
    pub hours: usize,
}

/// Project info taken from the `ProjectInfo` marker row.
pub const LEGACY_PROJECT: ProjectColumns = ProjectColumns {
    project_number: 9,
    work_location: 8,
    report_date: 11,
    report_number: 12,
    employee_id: 13,
    employee_name: 14,
    trade: 15,
    concern_id: Some(5),
    project_name: None,
};

/// `linenumber,reportID,component,workDone,quantity,hours,dateCreated,text,zusatz,activeProject,location`
pub const LEGACY_LINE: LineColumns = LineColumns {
    min_fields: 11,
    line_number: 0,
    component: 2,
    work_done: 3,
    quantity: 4,
    hours: 5,
};

/// Trailing columns of a legacy work line, in order.
pub const LEGACY_LINE_REPORT_ID: usize = 1;
pub const LEGACY_LINE_DATE_CREATED: usize = 6;
pub const LEGACY_LINE_TEXT: usize = 7;
pub const LEGACY_LINE_ADDITION: usize = 8;
pub const LEGACY_LINE_ACTIVE_PROJECT: usize = 9;
pub const LEGACY_LINE_LOCATION: usize = 10;

/// Project info taken from the first data row after the header.
pub const NEWER_PROJECT: ProjectColumns = ProjectColumns {
    project_number: 5,
    work_location: 6,
    report_date: 7,
    report_number: 8,
    employee_id: 9,
    employee_name: 10,
    trade: 12,
    concern_id: None,
    project_name: Some(11),
};

/// `linenumber,component,workDone,quantity,hours,activeProject,location,dateCreated,UIDAB,mitarbeiterID,mitarbeiterName,activeprojectName,gewerk`
///
/// Work lines repeat the project columns at the same offsets as [`NEWER_PROJECT`].
pub const NEWER_LINE: LineColumns = LineColumns {
    min_fields: 13,
    line_number: 0,
    component: 1,
    work_done: 2,
    quantity: 3,
    hours: 4,
};

/// Header tokens that must all appear in the newer layout's header row.
pub const NEWER_HEADER_TOKENS: [&str; 3] = ["linenumber", "component", "workDone"];

/// First field of the header row in legacy exports.
pub const LEGACY_HEADER_FIRST_FIELD: &str = "linenumber";
