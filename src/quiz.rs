//! Multiple-choice quiz engine
//!
//! Questions ask for the meaning of a word; distractors are other words'
//! meanings. Results update persisted running statistics.

use crate::error::{Result, VocabError};
use crate::models::WordEntry;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const OPTION_COUNT: usize = 4;
pub const MIN_QUIZ_WORDS: usize = 4;

pub const QUESTION_PROMPTS: [&str; 4] = [
    "What does this word mean?",
    "Choose the correct meaning:",
    "What is the definition of this word?",
    "Select the right meaning:",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub word: String,
    pub prompt: &'static str,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub entry: WordEntry,
}

/// Build `count` questions. When `count` exceeds the collection, targets
/// cycle through fresh shuffles.
pub fn generate_quiz_questions<R: Rng + ?Sized>(
    words: &[WordEntry],
    count: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    if words.is_empty() {
        return Vec::new();
    }

    let mut targets: Vec<&WordEntry> = Vec::with_capacity(count);
    while targets.len() < count {
        let mut round: Vec<&WordEntry> = words.iter().collect();
        round.shuffle(rng);
        let take = (count - targets.len()).min(round.len());
        targets.extend(round.into_iter().take(take));
    }

    targets
        .into_iter()
        .map(|target| build_question(target, words, rng))
        .collect()
}

fn build_question<R: Rng + ?Sized>(target: &WordEntry, words: &[WordEntry], rng: &mut R) -> QuizQuestion {
    let correct = target.answer_text().to_string();
    let target_key = target.key();

    let mut pool: Vec<String> = Vec::new();
    for other in words {
        if other.key() == target_key {
            continue;
        }
        let answer = other.answer_text();
        if answer != correct && !pool.iter().any(|p| p == answer) {
            pool.push(answer.to_string());
        }
    }
    pool.shuffle(rng);

    let mut options: Vec<String> = pool.into_iter().take(OPTION_COUNT - 1).collect();
    let mut filler = 1;
    while options.len() < OPTION_COUNT - 1 {
        let candidate = format!("Alternative meaning {}", filler);
        filler += 1;
        if candidate != correct && !options.contains(&candidate) {
            options.push(candidate);
        }
    }

    let correct_index = rng.gen_range(0..OPTION_COUNT);
    options.insert(correct_index, correct.clone());

    QuizQuestion {
        word: target.word.clone(),
        prompt: QUESTION_PROMPTS[rng.gen_range(0..QUESTION_PROMPTS.len())],
        correct_answer: correct,
        options,
        correct_index,
        entry: target.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected_index: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub word: String,
    pub correct_answer: String,
}

/// An in-progress quiz
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current: usize,
    score: usize,
    answers: Vec<AnswerRecord>,
    /// Requested count before capping to the collection size
    pub requested: usize,
}

impl QuizSession {
    pub fn start<R: Rng + ?Sized>(words: &[WordEntry], requested: usize, rng: &mut R) -> Result<Self> {
        if words.len() < MIN_QUIZ_WORDS {
            return Err(VocabError::NotEnoughWords {
                required: MIN_QUIZ_WORDS,
                available: words.len(),
            });
        }
        if requested == 0 {
            return Err(VocabError::Quiz("question count must be at least 1".into()));
        }

        let count = requested.min(words.len());
        Ok(Self {
            questions: generate_quiz_questions(words, count, rng),
            current: 0,
            score: 0,
            answers: Vec::new(),
            requested,
        })
    }

    /// True when fewer questions than requested were generated
    pub fn was_capped(&self) -> bool {
        self.questions.len() < self.requested
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn position(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Answer the current question and advance
    pub fn answer(&mut self, selected: usize) -> Result<AnswerRecord> {
        let question = self
            .current()
            .ok_or_else(|| VocabError::Quiz("quiz already finished".into()))?;
        if selected >= question.options.len() {
            return Err(VocabError::Quiz(format!("no option {}", selected + 1)));
        }

        let record = AnswerRecord {
            question_index: self.current,
            selected_index: selected,
            correct_index: question.correct_index,
            is_correct: selected == question.correct_index,
            word: question.word.clone(),
            correct_answer: question.correct_answer.clone(),
        };
        if record.is_correct {
            self.score += 1;
        }
        self.answers.push(record.clone());
        self.current += 1;
        Ok(record)
    }

    /// Score the session and fold it into `stats`
    pub fn finish(&self, stats: &mut QuizStats, today: NaiveDate) -> QuizResult {
        let total = self.total();
        let percentage = percentage(self.score, total);
        stats.record(self.score, total, percentage, today);
        QuizResult {
            correct: self.score,
            wrong: total - self.score,
            total,
            percentage,
            grade: Grade::for_percentage(percentage),
        }
    }
}

fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub correct: usize,
    pub wrong: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: Grade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Outstanding,
    Excellent,
    WellDone,
    GoodJob,
    KeepPracticing,
}

impl Grade {
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Grade::Outstanding,
            80..=89 => Grade::Excellent,
            70..=79 => Grade::WellDone,
            60..=69 => Grade::GoodJob,
            _ => Grade::KeepPracticing,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Grade::Outstanding => "Outstanding!",
            Grade::Excellent => "Excellent!",
            Grade::WellDone => "Well Done!",
            Grade::GoodJob => "Good Job!",
            Grade::KeepPracticing => "Keep Practicing!",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Grade::Outstanding => "🏆",
            Grade::Excellent => "🎉",
            Grade::WellDone => "👏",
            Grade::GoodJob => "👍",
            Grade::KeepPracticing => "💪",
        }
    }
}

/// Running statistics across quizzes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizStats {
    pub total_quizzes: u32,
    pub best_score: u32,
    pub total_correct: u64,
    pub total_questions: u64,
    pub average_score: u32,
    /// Consecutive days with at least one quiz
    pub streak: u32,
    pub last_quiz_date: Option<NaiveDate>,
}

impl QuizStats {
    pub fn record(&mut self, correct: usize, total: usize, percentage: u32, today: NaiveDate) {
        self.total_quizzes += 1;
        self.best_score = self.best_score.max(percentage);
        self.total_correct += correct as u64;
        self.total_questions += total as u64;
        self.average_score = if self.total_questions == 0 {
            0
        } else {
            ((self.total_correct as f64 / self.total_questions as f64) * 100.0).round() as u32
        };

        self.streak = match self.last_quiz_date {
            Some(last) if last == today => self.streak.max(1),
            Some(last) if today.pred_opt() == Some(last) => self.streak + 1,
            _ => 1,
        };
        self.last_quiz_date = Some(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(n: usize) -> Vec<WordEntry> {
        (0..n)
            .map(|i| WordEntry::new(format!("word{i}")).with_meaning(format!("meaning {i}")))
            .collect()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_questions_have_four_distinct_options() {
        let mut rng = StdRng::seed_from_u64(7);
        let words = words(6);
        for n in [1, 4, 6, 15] {
            let questions = generate_quiz_questions(&words, n, &mut rng);
            assert_eq!(questions.len(), n);
            for q in &questions {
                assert_eq!(q.options.len(), OPTION_COUNT);
                let mut unique = q.options.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), OPTION_COUNT);
                assert_eq!(q.options.iter().filter(|o| **o == q.correct_answer).count(), 1);
                assert_eq!(q.options[q.correct_index], q.entry.answer_text());
            }
        }
    }

    #[test]
    fn test_small_pool_uses_fillers() {
        let mut rng = StdRng::seed_from_u64(1);
        // Duplicate meanings shrink the distractor pool to one
        let words = vec![
            WordEntry::new("a").with_meaning("same"),
            WordEntry::new("b").with_meaning("same"),
            WordEntry::new("c").with_meaning("other"),
        ];
        let q = &generate_quiz_questions(&words, 1, &mut rng)[0];
        assert_eq!(q.options.len(), OPTION_COUNT);
        assert!(q.options.iter().any(|o| o.starts_with("Alternative meaning")));
    }

    #[test]
    fn test_correct_position_varies() {
        let mut rng = StdRng::seed_from_u64(99);
        let questions = generate_quiz_questions(&words(8), 200, &mut rng);
        let mut seen = [false; OPTION_COUNT];
        for q in &questions {
            seen[q.correct_index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_session_requires_four_words() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = QuizSession::start(&words(3), 5, &mut rng).unwrap_err();
        assert!(matches!(err, VocabError::NotEnoughWords { required: 4, available: 3 }));
    }

    #[test]
    fn test_session_caps_and_scores() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = QuizSession::start(&words(5), 10, &mut rng).unwrap();
        assert!(session.was_capped());
        assert_eq!(session.total(), 5);

        while let Some(q) = session.current() {
            let pick = if session.position() % 2 == 0 {
                q.correct_index
            } else {
                (q.correct_index + 1) % OPTION_COUNT
            };
            session.answer(pick).unwrap();
        }
        assert!(session.is_finished());
        assert!(session.answer(0).is_err());

        let mut stats = QuizStats::default();
        let result = session.finish(&mut stats, day("2026-10-14"));
        assert_eq!(result.correct, 3);
        assert_eq!(result.wrong, 2);
        assert_eq!(result.percentage, 60);
        assert_eq!(result.grade, Grade::GoodJob);
        assert_eq!(stats.best_score, 60);
        assert_eq!(stats.total_quizzes, 1);
    }

    #[test]
    fn test_stats_streak() {
        let mut stats = QuizStats::default();
        stats.record(5, 10, 50, day("2026-10-12"));
        stats.record(8, 10, 80, day("2026-10-13"));
        stats.record(9, 10, 90, day("2026-10-13"));
        assert_eq!(stats.streak, 2);
        assert_eq!(stats.best_score, 90);
        assert_eq!(stats.average_score, 73);

        stats.record(1, 10, 10, day("2026-10-20"));
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.best_score, 90);
    }

    #[test]
    fn test_grades() {
        assert_eq!(Grade::for_percentage(100), Grade::Outstanding);
        assert_eq!(Grade::for_percentage(85).title(), "Excellent!");
        assert_eq!(Grade::for_percentage(59), Grade::KeepPracticing);
    }
}
