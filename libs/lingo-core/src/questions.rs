//! Built-in multiple-choice question bank.
//!
//! Languages without their own bank fall back to English.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Difficulty, Language, Question};

/// Questions served per daily quiz.
pub const DAILY_QUIZ_SIZE: usize = 10;

macro_rules! q {
    ($id:literal, $question:literal, [$a:literal, $b:literal, $c:literal, $d:literal], $correct:literal, $difficulty:ident) => {
        Question {
            id: $id,
            question: $question,
            options: [$a, $b, $c, $d],
            correct_answer: $correct,
            difficulty: Difficulty::$difficulty,
        }
    };
}

static FRENCH: [Question; 10] = [
    q!("fr1", "How do you say 'Hello' in French?", ["Bonjour", "Au revoir", "Merci", "S'il vous plaît"], 0, Easy),
    q!("fr2", "What does 'Merci' mean in English?", ["Please", "Thank you", "Excuse me", "Goodbye"], 1, Easy),
    q!("fr3", "How do you say 'Good morning' in French?", ["Bonne nuit", "Bon après-midi", "Bonjour", "Bonsoir"], 2, Easy),
    q!("fr4", "What is the French word for 'water'?", ["Lait", "Eau", "Jus", "Café"], 1, Medium),
    q!("fr5", "How do you say 'I love you' in French?", ["Je t'aime", "Je te déteste", "Je suis désolé", "Je ne sais pas"], 0, Medium),
    q!("fr6", "What does 'Au revoir' mean?", ["Hello", "Thank you", "Goodbye", "Please"], 2, Easy),
    q!("fr7", "How do you say 'Yes' in French?", ["Non", "Oui", "Peut-être", "Jamais"], 1, Easy),
    q!("fr8", "What is 'bread' in French?", ["Pain", "Beurre", "Fromage", "Lait"], 0, Medium),
    q!("fr9", "How do you ask 'How are you?' in French?", ["Où êtes-vous?", "Comment allez-vous?", "Que faites-vous?", "Qui êtes-vous?"], 1, Medium),
    q!("fr10", "What does 'Bonne nuit' mean?", ["Good morning", "Good afternoon", "Good evening", "Good night"], 3, Easy),
];

static SPANISH: [Question; 10] = [
    q!("es1", "How do you say 'Hello' in Spanish?", ["Hola", "Adiós", "Gracias", "Por favor"], 0, Easy),
    q!("es2", "What does 'Gracias' mean in English?", ["Please", "Thank you", "Excuse me", "Goodbye"], 1, Easy),
    q!("es3", "How do you say 'Good morning' in Spanish?", ["Buenas noches", "Buenas tardes", "Buenos días", "Buenas"], 2, Easy),
    q!("es4", "What is the Spanish word for 'water'?", ["Leche", "Agua", "Jugo", "Café"], 1, Medium),
    q!("es5", "How do you say 'I love you' in Spanish?", ["Te amo", "Te odio", "Lo siento", "No sé"], 0, Medium),
    q!("es6", "What does 'Adiós' mean?", ["Hello", "Thank you", "Goodbye", "Please"], 2, Easy),
    q!("es7", "How do you say 'Yes' in Spanish?", ["No", "Sí", "Tal vez", "Nunca"], 1, Easy),
    q!("es8", "What is 'bread' in Spanish?", ["Pan", "Mantequilla", "Queso", "Leche"], 0, Medium),
    q!("es9", "How do you ask 'How are you?' in Spanish?", ["¿Dónde estás?", "¿Cómo estás?", "¿Qué haces?", "¿Quién eres?"], 1, Medium),
    q!("es10", "What does 'Buenas noches' mean?", ["Good morning", "Good afternoon", "Good evening", "Good night"], 3, Easy),
];

static ENGLISH: [Question; 10] = [
    q!("en1", "Which is the correct spelling?", ["Recieve", "Receive", "Receve", "Receiv"], 1, Medium),
    q!("en2", "What is the past tense of 'go'?", ["Goed", "Gone", "Went", "Going"], 2, Easy),
    q!("en3", "Choose the correct article: '__ apple'", ["A", "An", "The", "No article needed"], 1, Easy),
    q!("en4", "What is the plural of 'child'?", ["Childs", "Children", "Childes", "Child"], 1, Medium),
    q!("en5", "Which sentence is grammatically correct?", ["She don't like pizza", "She doesn't like pizza", "She not like pizza", "She no like pizza"], 1, Medium),
    q!("en6", "What is the comparative form of 'good'?", ["Gooder", "More good", "Better", "Best"], 2, Easy),
    q!("en7", "Choose the correct preposition: 'I'm interested __ music'", ["in", "on", "at", "for"], 0, Medium),
    q!("en8", "What is the past participle of 'eat'?", ["Ate", "Eaten", "Eating", "Eated"], 1, Medium),
    q!("en9", "Which word is a synonym for 'happy'?", ["Sad", "Angry", "Joyful", "Tired"], 2, Easy),
    q!("en10", "Choose the correct form: 'If I __ you, I would study harder'", ["am", "was", "were", "be"], 2, Hard),
];

/// All questions available for a language.
pub fn bank_for(language: Language) -> &'static [Question] {
    match language {
        Language::French => &FRENCH,
        Language::Spanish => &SPANISH,
        _ => &ENGLISH,
    }
}

/// Up to `count` questions for today's quiz, in random order.
pub fn daily_questions<R: Rng + ?Sized>(
    language: Language,
    rng: &mut R,
    count: usize,
) -> Vec<Question> {
    bank_for(language)
        .choose_multiple(rng, count)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn every_bank_is_well_formed() {
        for lang in Language::ALL {
            let bank = bank_for(lang);
            assert!(!bank.is_empty());
            let ids: HashSet<_> = bank.iter().map(|q| q.id).collect();
            assert_eq!(ids.len(), bank.len(), "duplicate id in {}", lang.as_str());
            assert!(bank.iter().all(|q| q.correct_answer < q.options.len()));
        }
    }

    #[test]
    fn unsupported_language_falls_back_to_english() {
        assert_eq!(bank_for(Language::Japanese), bank_for(Language::English));
        assert_eq!(bank_for(Language::French)[0].id, "fr1");
    }

    #[test]
    fn daily_quiz_has_distinct_questions() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions = daily_questions(Language::Spanish, &mut rng, DAILY_QUIZ_SIZE);
        assert_eq!(questions.len(), DAILY_QUIZ_SIZE);
        let ids: HashSet<_> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), DAILY_QUIZ_SIZE);
        assert!(ids.iter().all(|id| id.starts_with("es")));
    }

    #[test]
    fn daily_quiz_is_capped_by_bank_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let questions = daily_questions(Language::English, &mut rng, 50);
        assert_eq!(questions.len(), ENGLISH.len());

        let few = daily_questions(Language::English, &mut rng, 3);
        assert_eq!(few.len(), 3);
    }
}
