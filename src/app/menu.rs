use crate::adapters::storage::count_entries;
use crate::core::{ReferenceCollection, SaveOutcome, SortKey, Storage};
use crate::domain::model::StudentReference;
use crate::utils::validation::Validate;
use anyhow::Result;
use std::io::{BufRead, Write};

const MENU: &str = "\nМеню:\n\
1. Посчитать файлы в директории\n\
2. Загрузить данные\n\
3. Сортировать по ФИО\n\
4. Сортировать по стипендии\n\
5. Фильтровать по стипендии > X\n\
6. Добавить запись\n\
7. Сохранить данные\n\
8. Выход";

const LOAD_FIRST: &str = "Сначала загрузите данные!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    CountFiles,
    Load,
    SortByName,
    SortByStipend,
    Filter,
    Add,
    Save,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(MenuChoice::CountFiles),
            "2" => Some(MenuChoice::Load),
            "3" => Some(MenuChoice::SortByName),
            "4" => Some(MenuChoice::SortByStipend),
            "5" => Some(MenuChoice::Filter),
            "6" => Some(MenuChoice::Add),
            "7" => Some(MenuChoice::Save),
            "8" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Interactive front end over one data file.
///
/// Data errors are printed and the loop continues; only terminal I/O failures
/// end the session with an error.
pub struct MenuSession<R: BufRead, W: Write, S: Storage> {
    input: R,
    output: W,
    storage: S,
    data_file: String,
    collection: Option<ReferenceCollection>,
}

impl<R: BufRead, W: Write, S: Storage> MenuSession<R, W, S> {
    pub fn new(input: R, output: W, storage: S, data_file: impl Into<String>) -> Self {
        Self {
            input,
            output,
            storage,
            data_file: data_file.into(),
            collection: None,
        }
    }

    pub fn collection(&self) -> Option<&ReferenceCollection> {
        self.collection.as_ref()
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the exit item is chosen or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("Выберите пункт: ")? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(line.trim()) else {
                tracing::debug!("Ignoring menu input '{}'", line);
                continue;
            };

            match choice {
                MenuChoice::CountFiles => self.count_files()?,
                MenuChoice::Load => self.load()?,
                MenuChoice::SortByName => self.sort(SortKey::Name)?,
                MenuChoice::SortByStipend => self.sort(SortKey::Stipend)?,
                MenuChoice::Filter => self.filter()?,
                MenuChoice::Add => self.add()?,
                MenuChoice::Save => self.save()?,
                MenuChoice::Exit => break,
            }
        }
        Ok(())
    }

    /// `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt_stipend(&mut self, label: &str) -> Result<Option<std::result::Result<f64, String>>> {
        Ok(self.prompt(label)?.map(|text| {
            text.trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' не является числом", text))
        }))
    }

    fn count_files(&mut self) -> Result<()> {
        let Some(path) = self.prompt("Путь: ")? else {
            return Ok(());
        };
        match count_entries(&path) {
            Ok(count) => writeln!(self.output, "Файлов: {}", count)?,
            Err(e) => writeln!(self.output, "Ошибка: {}", e.user_friendly_message())?,
        }
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        match ReferenceCollection::load(&self.storage, &self.data_file) {
            Some(collection) => {
                self.collection = Some(collection);
                writeln!(self.output, "Данные загружены")?;
            }
            None => writeln!(self.output, "Ошибка")?,
        }
        Ok(())
    }

    fn sort(&mut self, key: SortKey) -> Result<()> {
        match self.collection.as_mut() {
            Some(collection) => {
                collection.sort_by_key(key);
                writeln!(self.output, "{}", collection)?;
            }
            None => writeln!(self.output, "{}", LOAD_FIRST)?,
        }
        Ok(())
    }

    fn filter(&mut self) -> Result<()> {
        if self.collection.is_none() {
            writeln!(self.output, "{}", LOAD_FIRST)?;
            return Ok(());
        }
        let threshold = match self.prompt_stipend("Введите X: ")? {
            None => return Ok(()),
            Some(Ok(value)) => value,
            Some(Err(_)) => {
                writeln!(self.output, "Ошибка ввода!")?;
                return Ok(());
            }
        };

        if let Some(collection) = &self.collection {
            for reference in collection.filter_by_stipend(threshold) {
                writeln!(self.output, "{}", reference)?;
            }
        }
        Ok(())
    }

    fn add(&mut self) -> Result<()> {
        if self.collection.is_none() {
            writeln!(self.output, "{}", LOAD_FIRST)?;
            return Ok(());
        }

        let mut builder = StudentReference::builder();
        let Some(id) = self.prompt("№: ")? else { return Ok(()) };
        builder = builder.id(id);
        let Some(date) = self.prompt("Дата: ")? else { return Ok(()) };
        builder = builder.date(date);
        let Some(full_name) = self.prompt("ФИО: ")? else { return Ok(()) };
        builder = builder.full_name(full_name);
        let stipend = match self.prompt_stipend("Стипендия: ")? {
            None => return Ok(()),
            Some(Ok(value)) => value,
            Some(Err(message)) => {
                writeln!(self.output, "Ошибка: {}", message)?;
                return Ok(());
            }
        };
        builder = builder.stipend(stipend);
        let Some(destination) = self.prompt("Назначение: ")? else { return Ok(()) };
        let reference = builder.destination(destination).build();

        if let Err(e) = reference.validate() {
            tracing::debug!("Rejected new reference: {}", e);
            writeln!(self.output, "Ошибка: {}", e.user_friendly_message())?;
            return Ok(());
        }

        if let Some(collection) = self.collection.as_mut() {
            match collection.add(reference) {
                Ok(()) => writeln!(self.output, "Добавлено!")?,
                Err(e) => writeln!(self.output, "Ошибка: {}", e.user_friendly_message())?,
            }
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let Some(collection) = &self.collection else {
            writeln!(self.output, "{}", LOAD_FIRST)?;
            return Ok(());
        };

        match collection.save(&self.storage, &self.data_file) {
            SaveOutcome::Written { .. } => {
                writeln!(self.output, "Данные сохранены в {}", self.data_file)?
            }
            SaveOutcome::NothingToSave => writeln!(self.output, "Нет данных для сохранения!")?,
            SaveOutcome::Failed => writeln!(self.output, "Ошибка сохранения")?,
        }
        Ok(())
    }
}
