use burn::{
    nn::{Embedding, EmbeddingConfig, Linear, LinearConfig},
    prelude::*,
};

// Config derive supplies Clone + serde; saved as model_config.json.
#[derive(Config, Debug)]
pub struct SentimentClassifierConfig {
    pub vocab_size:  usize,
    pub d_model:     usize,
    #[config(default = 2)]
    pub num_classes: usize,
    #[config(default = 0)]
    pub pad_index:   usize,
}

impl SentimentClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SentimentClassifier<B> {
        let token_embedding = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let head            = LinearConfig::new(self.d_model, self.num_classes).init(device);
        SentimentClassifier {
            token_embedding,
            head,
            pad_index: self.pad_index,
        }
    }
}

#[derive(Module, Debug)]
pub struct SentimentClassifier<B: Backend> {
    pub token_embedding: Embedding<B>,
    pub head:            Linear<B>,
    pub pad_index:       usize,
}

impl<B: Backend> SentimentClassifier<B> {
    /// input_ids: [batch, seq_len] → logits: [batch, num_classes]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let [batch_size, seq_len] = input_ids.dims();

        // 1.0 on real tokens, 0.0 on filler
        let mask = input_ids
            .clone()
            .equal_elem(self.pad_index as i32)
            .bool_not()
            .float(); // [batch, seq_len]

        let emb = self.token_embedding.forward(input_ids); // [batch, seq_len, d_model]
        let [_, _, d_model] = emb.dims();

        // Mean over non-filler positions. An all-filler row has a
        // zero sum and its count is clamped to 1, so it pools to zero.
        let summed = (emb * mask.clone().unsqueeze_dim::<3>(2).expand([batch_size, seq_len, d_model]))
            .sum_dim(1); // [batch, 1, d_model]
        let counts = mask
            .sum_dim(1)
            .clamp_min(1.0)
            .unsqueeze_dim::<3>(2)
            .expand([batch_size, 1, d_model]);
        let pooled = (summed / counts).reshape([batch_size, d_model]);

        self.head.forward(pooled)
    }

    /// Class probabilities: softmax of the logits over dim 1.
    pub fn forward_proba(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        burn::tensor::activation::softmax(self.forward(input_ids), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn ids(rows: &[[i32; 4]]) -> Tensor<TestBackend, 2, Int> {
        let flat: Vec<i32> = rows.iter().flatten().copied().collect();
        Tensor::<TestBackend, 1, Int>::from_ints(flat.as_slice(), &Default::default())
            .reshape([rows.len(), 4])
    }

    #[test]
    fn test_output_shape() {
        let model: SentimentClassifier<TestBackend> =
            SentimentClassifierConfig::new(10, 8).init(&Default::default());
        let logits = model.forward(ids(&[[1, 2, 3, 0], [4, 0, 0, 0], [0, 0, 0, 0]]));
        assert_eq!(logits.dims(), [3, 2]);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model: SentimentClassifier<TestBackend> =
            SentimentClassifierConfig::new(10, 8).init(&Default::default());
        let probs: Vec<f32> = model
            .forward_proba(ids(&[[1, 2, 3, 0], [5, 6, 0, 0]]))
            .into_data()
            .to_vec::<f32>()
            .unwrap();
        for row in probs.chunks(2) {
            assert!((row[0] + row[1] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_padding_does_not_change_prediction() {
        let model: SentimentClassifier<TestBackend> =
            SentimentClassifierConfig::new(10, 8).init(&Default::default());
        let short: Vec<f32> = model.forward(ids(&[[3, 7, 0, 0]])).into_data().to_vec::<f32>().unwrap();

        let long_ids = Tensor::<TestBackend, 1, Int>::from_ints([3, 7, 0, 0, 0, 0, 0, 0].as_slice(), &Default::default())
            .reshape([1, 8]);
        let long: Vec<f32> = model.forward(long_ids).into_data().to_vec::<f32>().unwrap();

        for (a, b) in short.iter().zip(long.iter()) {
            assert!((a - b).abs() < 1e-5);
        }
    }
}
