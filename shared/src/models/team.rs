//! Team Model
//!
//! A team is a label shared by membership rows; it exists while at least one
//! row references it.

use serde::{Deserialize, Serialize};

/// Team membership row (team_member 表)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct TeamMember {
    pub id: i64,
    pub team_name: String,
    pub employee_id: i64,
    pub employee_name: String,
    pub created_at: i64,
}

/// Member entry inside a grouped team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberRef {
    pub employee_id: i64,
    pub employee_name: String,
}

/// Team with its members, grouped from membership rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub members: Vec<TeamMemberRef>,
}

impl Team {
    /// Group membership rows (ordered by team name) into teams
    pub fn group(rows: Vec<TeamMember>) -> Vec<Team> {
        let mut teams: Vec<Team> = Vec::new();
        for row in rows {
            let member = TeamMemberRef {
                employee_id: row.employee_id,
                employee_name: row.employee_name,
            };
            match teams.last_mut() {
                Some(team) if team.name == row.team_name => team.members.push(member),
                _ => teams.push(Team {
                    name: row.team_name,
                    members: vec![member],
                }),
            }
        }
        teams
    }
}

/// Create team payload (name + at least one employee)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamCreate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub employee_ids: Vec<i64>,
}

/// Update team payload
///
/// `employee_ids` is the desired member set; the difference against the
/// current rows decides what gets added or removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamUpdate {
    /// New team name (rename)
    pub name: Option<String>,
    #[serde(default)]
    pub employee_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, team: &str, employee_id: i64, name: &str) -> TeamMember {
        TeamMember {
            id,
            team_name: team.into(),
            employee_id,
            employee_name: name.into(),
            created_at: 0,
        }
    }

    #[test]
    fn groups_consecutive_rows() {
        let teams = Team::group(vec![
            row(1, "Backend", 1, "Ann"),
            row(2, "Backend", 2, "Bob"),
            row(3, "Design", 3, "Cid"),
        ]);
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "Backend");
        assert_eq!(teams[0].members.len(), 2);
        assert_eq!(teams[1].members[0].employee_name, "Cid");
    }

    #[test]
    fn empty_rows_yield_no_teams() {
        assert!(Team::group(Vec::new()).is_empty());
    }
}
