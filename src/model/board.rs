use super::task::TaskStatus;

/// Static descriptor for one board column. Exactly three exist, in fixed
/// order; they are not user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub title: &'static str,
    /// Hex accent color, overridable via `[ui.colors]`
    pub color: &'static str,
}

pub const BOARD_COLUMNS: [BoardColumn; 3] = [
    BoardColumn {
        status: TaskStatus::Todo,
        title: "To Do",
        color: "#f5222d",
    },
    BoardColumn {
        status: TaskStatus::Doing,
        title: "In Progress",
        color: "#faad14",
    },
    BoardColumn {
        status: TaskStatus::Done,
        title: "Done",
        color: "#52c41a",
    },
];

/// Look up the column descriptor for a status.
pub fn column_for(status: TaskStatus) -> &'static BoardColumn {
    match status {
        TaskStatus::Todo => &BOARD_COLUMNS[0],
        TaskStatus::Doing => &BOARD_COLUMNS[1],
        TaskStatus::Done => &BOARD_COLUMNS[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_cover_statuses_in_order() {
        let statuses: Vec<TaskStatus> = BOARD_COLUMNS.iter().map(|c| c.status).collect();
        assert_eq!(statuses, TaskStatus::ALL.to_vec());
    }

    #[test]
    fn column_for_matches_table() {
        for column in &BOARD_COLUMNS {
            assert_eq!(column_for(column.status).title, column.title);
        }
    }
}
