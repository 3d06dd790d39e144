// src/services/leaderboard.rs

use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use crate::{
    config::LEADERBOARD_PAGE_SIZE,
    models::{
        ids::{ChallengeId, ProblemId, TeamId, UserId},
        leaderboard::{LeaderboardPage, LeaderboardRows},
        team::{MemberSummary, ProblemScore, TeamStanding},
        user::{UserProfile, UserStanding},
    },
};

/// A row that can be placed on a ranked board.
pub trait Ranked {
    fn name(&self) -> &str;
    fn score(&self) -> f64;
    fn set_score(&mut self, score: f64);
    fn set_rank(&mut self, rank: usize);
    fn challenge_scores(&self) -> &BTreeMap<ChallengeId, f64>;
}

impl Ranked for TeamStanding {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }

    fn challenge_scores(&self) -> &BTreeMap<ChallengeId, f64> {
        &self.challenge_scores
    }
}

impl Ranked for UserStanding {
    fn name(&self) -> &str {
        &self.name
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    fn set_rank(&mut self, rank: usize) {
        self.rank = rank;
    }

    fn challenge_scores(&self) -> &BTreeMap<ChallengeId, f64> {
        &self.challenge_scores
    }
}

/// Counts of input that did not make it into any team total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationReport {
    /// Submissions with no user id or no problem id.
    pub submissions_missing_ids: usize,
    /// Best (user, problem) scores whose problem has no challenge, or is unknown.
    pub scores_without_challenge: usize,
}

impl AggregationReport {
    pub fn is_clean(&self) -> bool {
        self.submissions_missing_ids == 0 && self.scores_without_challenge == 0
    }
}

/// Result of a full aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Every team, sorted by `total_score` descending and ranked 1..N.
    pub standings: Vec<TeamStanding>,
    /// Every user of `rows.users`, ranked the same way.
    pub users: Vec<UserStanding>,
    /// Sum of each user's best problem scores over challenged problems.
    pub individual_scores: HashMap<UserId, f64>,
    pub report: AggregationReport,
}

/// Problem lookups built once per aggregation.
struct ProblemIndex<'a> {
    challenge: HashMap<&'a ProblemId, &'a ChallengeId>,
    title: HashMap<&'a ProblemId, &'a str>,
}

impl<'a> ProblemIndex<'a> {
    fn new(rows: &'a LeaderboardRows) -> Self {
        Self {
            challenge: rows
                .problems
                .iter()
                .filter_map(|p| p.challenge_id.as_ref().map(|c| (&p.id, c)))
                .collect(),
            title: rows.problems.iter().map(|p| (&p.id, p.title.as_str())).collect(),
        }
    }

    /// One user's best scores on challenged problems, keyed by challenge.
    fn group(
        &self,
        problems: &HashMap<&ProblemId, f64>,
    ) -> BTreeMap<ChallengeId, Vec<ProblemScore>> {
        let mut grouped: BTreeMap<ChallengeId, Vec<ProblemScore>> = BTreeMap::new();
        for (problem_id, score) in problems {
            let Some(challenge_id) = self.challenge.get(*problem_id) else {
                continue;
            };
            grouped
                .entry((*challenge_id).clone())
                .or_default()
                .push(ProblemScore {
                    problem_id: (*problem_id).clone(),
                    title: self.title.get(*problem_id).copied().unwrap_or_default().to_owned(),
                    score: *score,
                });
        }
        grouped
    }
}

struct TeamAccumulator {
    id: TeamId,
    name: String,
    members: Vec<MemberSummary>,
    problem_scores: BTreeMap<ChallengeId, Vec<ProblemScore>>,
}

/// Turns raw submission, membership and problem rows into ranked team and user standings.
///
/// * Only the highest submission per (user, problem) counts.
/// * A problem solved by several members of a team counts once, with the best score.
/// * Scores on problems without a challenge are dropped and counted in the report.
///
/// Ties keep the order in which teams first appear in `rows.members`
/// and users appear in `rows.users`.
pub fn aggregate(rows: &LeaderboardRows) -> Aggregation {
    let mut report = AggregationReport::default();

    let index = ProblemIndex::new(rows);

    // Best score per user per problem; overwrite only on a strictly greater score.
    let mut best: HashMap<&UserId, HashMap<&ProblemId, f64>> = HashMap::new();
    for submission in &rows.submissions {
        let (Some(user_id), Some(problem_id)) = (&submission.user_id, &submission.problem_id)
        else {
            report.submissions_missing_ids += 1;
            continue;
        };

        match best.entry(user_id).or_default().entry(problem_id) {
            Entry::Vacant(slot) => {
                slot.insert(submission.total_score);
            }
            Entry::Occupied(mut slot) => {
                if submission.total_score > *slot.get() {
                    slot.insert(submission.total_score);
                }
            }
        }
    }

    let mut individual_scores = HashMap::with_capacity(best.len());
    for (user_id, problems) in &best {
        let mut total = 0.0;
        for (problem_id, score) in problems {
            if index.challenge.contains_key(*problem_id) {
                total += score;
            } else {
                report.scores_without_challenge += 1;
            }
        }
        individual_scores.insert((*user_id).clone(), total);
    }

    let mut teams: Vec<TeamAccumulator> = Vec::new();
    let mut team_index: HashMap<&TeamId, usize> = HashMap::new();
    let mut user_team: HashMap<&UserId, &TeamId> = HashMap::new();
    for member in &rows.members {
        user_team.entry(&member.user_id).or_insert(&member.team_id);

        let idx = *team_index.entry(&member.team_id).or_insert_with(|| {
            teams.push(TeamAccumulator {
                id: member.team_id.clone(),
                name: member.team_name.clone(),
                members: Vec::new(),
                problem_scores: BTreeMap::new(),
            });
            teams.len() - 1
        });
        let team = &mut teams[idx];

        team.members.push(MemberSummary {
            user_id: member.user_id.clone(),
            display_name: member.display_name.clone(),
            avatar_url: member.avatar_url.clone(),
        });

        if let Some(problems) = best.get(&member.user_id) {
            for (challenge_id, entries) in index.group(problems) {
                team.problem_scores.entry(challenge_id).or_default().extend(entries);
            }
        }
    }

    let mut standings: Vec<TeamStanding> = teams.into_iter().map(consolidate).collect();
    rank_by_score(&mut standings);

    let mut users: Vec<UserStanding> = rows
        .users
        .iter()
        .map(|user| {
            let problem_scores = best
                .get(&user.id)
                .map(|problems| index.group(problems))
                .unwrap_or_default();
            user_standing(user, user_team.get(&user.id).copied(), problem_scores)
        })
        .collect();
    rank_by_score(&mut users);

    if !report.is_clean() {
        tracing::warn!(
            submissions_missing_ids = report.submissions_missing_ids,
            scores_without_challenge = report.scores_without_challenge,
            "Leaderboard aggregation dropped scores"
        );
    }

    Aggregation {
        standings,
        users,
        individual_scores,
        report,
    }
}

/// Deduplicates per-problem scores and derives challenge and total scores from them.
fn consolidate(team: TeamAccumulator) -> TeamStanding {
    let mut problem_scores = BTreeMap::new();
    let mut challenge_scores = BTreeMap::new();

    for (challenge_id, entries) in team.problem_scores {
        let mut unique: BTreeMap<ProblemId, ProblemScore> = BTreeMap::new();
        for entry in entries {
            let improves = unique
                .get(&entry.problem_id)
                .is_none_or(|existing| entry.score > existing.score);
            if improves {
                unique.insert(entry.problem_id.clone(), entry);
            }
        }

        let deduped: Vec<ProblemScore> = unique.into_values().collect();
        challenge_scores.insert(challenge_id.clone(), deduped.iter().map(|p| p.score).sum());
        problem_scores.insert(challenge_id, deduped);
    }

    let total_score: f64 = challenge_scores.values().sum();
    let avatar = team
        .members
        .first()
        .and_then(|m| m.avatar_url.clone())
        .unwrap_or_default();

    TeamStanding {
        id: team.id,
        name: team.name,
        avatar,
        members: team.members,
        challenge_scores,
        problem_scores,
        total_score,
        score: total_score,
        rank: 0,
    }
}

/// A user's scores are already unique per problem; only ordering and totals remain.
fn user_standing(
    user: &UserProfile,
    team_id: Option<&TeamId>,
    mut problem_scores: BTreeMap<ChallengeId, Vec<ProblemScore>>,
) -> UserStanding {
    let mut challenge_scores = BTreeMap::new();
    for (challenge_id, entries) in problem_scores.iter_mut() {
        entries.sort_by(|a, b| a.problem_id.cmp(&b.problem_id));
        challenge_scores.insert(challenge_id.clone(), entries.iter().map(|p| p.score).sum());
    }
    let total_score: f64 = challenge_scores.values().sum();

    UserStanding {
        id: user.id.clone(),
        name: user.display_name.clone(),
        avatar: user.avatar_url.clone().unwrap_or_default(),
        team_id: team_id.cloned(),
        challenge_scores,
        problem_scores,
        total_score,
        score: total_score,
        rank: 0,
    }
}

/// Stable sort by `score` descending, then assigns ranks 1..N.
pub fn rank_by_score<T: Ranked>(standings: &mut [T]) {
    standings.sort_by(|a, b| b.score().total_cmp(&a.score()));
    for (idx, standing) in standings.iter_mut().enumerate() {
        standing.set_rank(idx + 1);
    }
}

/// Slices ranked standings to a 1-indexed page of `LEADERBOARD_PAGE_SIZE` rows.
pub fn paginate<T>(
    standings: Vec<T>,
    page: usize,
    rows: &LeaderboardRows,
    calculated_at: chrono::DateTime<chrono::Utc>,
) -> LeaderboardPage<T> {
    let page = page.max(1);
    let total_entries = standings.len();
    let start = (page - 1).saturating_mul(LEADERBOARD_PAGE_SIZE);

    let data: Vec<T> = standings
        .into_iter()
        .skip(start)
        .take(LEADERBOARD_PAGE_SIZE)
        .collect();

    LeaderboardPage {
        data,
        challenges: rows.challenges.clone(),
        problems: rows.problems.clone(),
        has_more: total_entries > page.saturating_mul(LEADERBOARD_PAGE_SIZE),
        page,
        total_entries,
        calculated_at,
    }
}
